use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A strictly positive amount of money to charge.
///
/// Wraps `rust_decimal::Decimal` so the conversions each vendor expects
/// (minor units, fixed two-decimal strings) live in one place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(GatewayError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Amount expressed in the currency's minor unit, truncating any
    /// sub-unit remainder.
    pub fn to_minor_units(&self, currency: Currency) -> Result<i64> {
        let factor = Decimal::from(10_i64.pow(currency.exponent()));
        self.0
            .checked_mul(factor)
            .and_then(|minor| minor.trunc().to_i64())
            .ok_or_else(|| {
                GatewayError::ValidationError(format!("Amount {} is out of range", self.0))
            })
    }

    /// Amount rendered with exactly two decimals. Fails rather than rounds
    /// when the amount has a finer precision.
    pub fn to_fixed_2(&self) -> Result<String> {
        if self.0.round_dp(2) != self.0 {
            return Err(GatewayError::ValidationError(format!(
                "Amount {} has more than two decimal places",
                self.0
            )));
        }
        let mut value = self.0.normalize();
        value.rescale(2);
        Ok(value.to_string())
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ISO 4217 currencies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    Aed,
    Afn,
    All,
    Amd,
    Ang,
    Aoa,
    Ars,
    Aud,
    Awg,
    Azn,
    Bam,
    Bbd,
    Bdt,
    Bgn,
    Bhd,
    Bif,
    Bmd,
    Bnd,
    Bob,
    Brl,
    Bsd,
    Btn,
    Bwp,
    Byn,
    Bzd,
    Cad,
    Cdf,
    Chf,
    Clf,
    Clp,
    Cny,
    Cop,
    Crc,
    Cuc,
    Cup,
    Cve,
    Czk,
    Djf,
    Dkk,
    Dop,
    Dzd,
    Egp,
    Ern,
    Etb,
    Eur,
    Fjd,
    Fkp,
    Gbp,
    Gel,
    Ghs,
    Gip,
    Gmd,
    Gnf,
    Gtq,
    Gyd,
    Hkd,
    Hnl,
    Hrk,
    Htg,
    Huf,
    Idr,
    Ils,
    Inr,
    Iqd,
    Irr,
    Isk,
    Jmd,
    Jod,
    Jpy,
    Kes,
    Kgs,
    Khr,
    Kmf,
    Kpw,
    Krw,
    Kwd,
    Kyd,
    Kzt,
    Lak,
    Lbp,
    Lkr,
    Lrd,
    Lsl,
    Lyd,
    Mad,
    Mdl,
    Mga,
    Mkd,
    Mmk,
    Mnt,
    Mop,
    Mru,
    Mur,
    Mvr,
    Mwk,
    Mxn,
    Myr,
    Mzn,
    Nad,
    Ngn,
    Nio,
    Nok,
    Npr,
    Nzd,
    Omr,
    Pab,
    Pen,
    Pgk,
    Php,
    Pkr,
    Pln,
    Pyg,
    Qar,
    Ron,
    Rsd,
    Rub,
    Rwf,
    Sar,
    Sbd,
    Scr,
    Sdg,
    Sek,
    Sgd,
    Shp,
    Sle,
    Sll,
    Sos,
    Srd,
    Ssp,
    Std,
    Stn,
    Svc,
    Syp,
    Szl,
    Thb,
    Tjs,
    Tmt,
    Tnd,
    Top,
    Try,
    Ttd,
    Twd,
    Tzs,
    Uah,
    Ugx,
    Usd,
    Uyu,
    Uzs,
    Ves,
    Vnd,
    Vuv,
    Wst,
    Xaf,
    Xcd,
    Xof,
    Xpf,
    Yer,
    Zar,
    Zmw,
    Zwl,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn numeric_code(&self) -> u16 {
        match self {
            Self::Aed => 784,
            Self::Afn => 971,
            Self::All => 8,
            Self::Amd => 51,
            Self::Ang => 532,
            Self::Aoa => 973,
            Self::Ars => 32,
            Self::Aud => 36,
            Self::Awg => 533,
            Self::Azn => 944,
            Self::Bam => 977,
            Self::Bbd => 52,
            Self::Bdt => 50,
            Self::Bgn => 975,
            Self::Bhd => 48,
            Self::Bif => 108,
            Self::Bmd => 60,
            Self::Bnd => 96,
            Self::Bob => 68,
            Self::Brl => 986,
            Self::Bsd => 44,
            Self::Btn => 64,
            Self::Bwp => 72,
            Self::Byn => 933,
            Self::Bzd => 84,
            Self::Cad => 124,
            Self::Cdf => 976,
            Self::Chf => 756,
            Self::Clf => 990,
            Self::Clp => 152,
            Self::Cny => 156,
            Self::Cop => 170,
            Self::Crc => 188,
            Self::Cuc => 931,
            Self::Cup => 192,
            Self::Cve => 132,
            Self::Czk => 203,
            Self::Djf => 262,
            Self::Dkk => 208,
            Self::Dop => 214,
            Self::Dzd => 12,
            Self::Egp => 818,
            Self::Ern => 232,
            Self::Etb => 230,
            Self::Eur => 978,
            Self::Fjd => 242,
            Self::Fkp => 238,
            Self::Gbp => 826,
            Self::Gel => 981,
            Self::Ghs => 936,
            Self::Gip => 292,
            Self::Gmd => 270,
            Self::Gnf => 324,
            Self::Gtq => 320,
            Self::Gyd => 328,
            Self::Hkd => 344,
            Self::Hnl => 340,
            Self::Hrk => 191,
            Self::Htg => 332,
            Self::Huf => 348,
            Self::Idr => 360,
            Self::Ils => 376,
            Self::Inr => 356,
            Self::Iqd => 368,
            Self::Irr => 364,
            Self::Isk => 352,
            Self::Jmd => 388,
            Self::Jod => 400,
            Self::Jpy => 392,
            Self::Kes => 404,
            Self::Kgs => 417,
            Self::Khr => 116,
            Self::Kmf => 174,
            Self::Kpw => 408,
            Self::Krw => 410,
            Self::Kwd => 414,
            Self::Kyd => 136,
            Self::Kzt => 398,
            Self::Lak => 418,
            Self::Lbp => 422,
            Self::Lkr => 144,
            Self::Lrd => 430,
            Self::Lsl => 426,
            Self::Lyd => 434,
            Self::Mad => 504,
            Self::Mdl => 498,
            Self::Mga => 969,
            Self::Mkd => 807,
            Self::Mmk => 104,
            Self::Mnt => 496,
            Self::Mop => 446,
            Self::Mru => 929,
            Self::Mur => 480,
            Self::Mvr => 462,
            Self::Mwk => 454,
            Self::Mxn => 484,
            Self::Myr => 458,
            Self::Mzn => 943,
            Self::Nad => 516,
            Self::Ngn => 566,
            Self::Nio => 558,
            Self::Nok => 578,
            Self::Npr => 524,
            Self::Nzd => 554,
            Self::Omr => 512,
            Self::Pab => 590,
            Self::Pen => 604,
            Self::Pgk => 598,
            Self::Php => 608,
            Self::Pkr => 586,
            Self::Pln => 985,
            Self::Pyg => 600,
            Self::Qar => 634,
            Self::Ron => 946,
            Self::Rsd => 941,
            Self::Rub => 643,
            Self::Rwf => 646,
            Self::Sar => 682,
            Self::Sbd => 90,
            Self::Scr => 690,
            Self::Sdg => 938,
            Self::Sek => 752,
            Self::Sgd => 702,
            Self::Shp => 654,
            Self::Sle => 925,
            Self::Sll => 694,
            Self::Sos => 706,
            Self::Srd => 968,
            Self::Ssp => 728,
            Self::Std => 678,
            Self::Stn => 930,
            Self::Svc => 222,
            Self::Syp => 760,
            Self::Szl => 748,
            Self::Thb => 764,
            Self::Tjs => 972,
            Self::Tmt => 934,
            Self::Tnd => 788,
            Self::Top => 776,
            Self::Try => 949,
            Self::Ttd => 780,
            Self::Twd => 901,
            Self::Tzs => 834,
            Self::Uah => 980,
            Self::Ugx => 800,
            Self::Usd => 840,
            Self::Uyu => 858,
            Self::Uzs => 860,
            Self::Ves => 928,
            Self::Vnd => 704,
            Self::Vuv => 548,
            Self::Wst => 882,
            Self::Xaf => 950,
            Self::Xcd => 951,
            Self::Xof => 952,
            Self::Xpf => 953,
            Self::Yer => 886,
            Self::Zar => 710,
            Self::Zmw => 967,
            Self::Zwl => 932,
        }
    }

    /// Number of decimals of the minor unit.
    pub fn exponent(&self) -> u32 {
        if matches!(
            self,
            Self::Bif
                | Self::Clp
                | Self::Djf
                | Self::Gnf
                | Self::Jpy
                | Self::Kmf
                | Self::Krw
                | Self::Mga
                | Self::Pyg
                | Self::Rwf
                | Self::Ugx
                | Self::Vnd
                | Self::Vuv
                | Self::Xaf
                | Self::Xof
                | Self::Xpf
        ) {
            0
        } else if matches!(
            self,
            Self::Bhd
                | Self::Jod
                | Self::Kwd
                | Self::Omr
                | Self::Tnd
        ) {
            3
        } else if matches!(self, Self::Clf) {
            4
        } else {
            2
        }
    }
}

impl FromStr for Currency {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Self::iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| GatewayError::ValidationError(format!("Unsupported currency: {code}")))
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
