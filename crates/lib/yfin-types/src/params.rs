use std::{error::Error, fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Error returned when a value is outside one of the closed parameter sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl Error for UnknownVariant {}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $label,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

closed_set! {
    /// Look-back window for a price history request.
    Period ("period") {
        OneDay => "1d",
        FiveDays => "5d",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
        SixMonths => "6mo",
        OneYear => "1y",
        TwoYears => "2y",
        FiveYears => "5y",
        TenYears => "10y",
        YearToDate => "ytd",
        Max => "max",
    }
}

closed_set! {
    /// Bar width for a price history request.
    Interval ("interval") {
        OneMinute => "1m",
        TwoMinutes => "2m",
        FiveMinutes => "5m",
        FifteenMinutes => "15m",
        ThirtyMinutes => "30m",
        SixtyMinutes => "60m",
        NinetyMinutes => "90m",
        OneHour => "1h",
        OneDay => "1d",
        FiveDays => "5d",
        OneWeek => "1wk",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
    }
}

closed_set! {
    /// Which part of a search response to return.
    SearchType ("search_type") {
        /// Quotes, news, lists, research reports, and navigation links.
        All => "all",
        Quotes => "quotes",
        News => "news",
    }
}

closed_set! {
    /// Market sector keys understood by the provider.
    Sector ("sector") {
        BasicMaterials => "basic-materials",
        CommunicationServices => "communication-services",
        ConsumerCyclical => "consumer-cyclical",
        ConsumerDefensive => "consumer-defensive",
        Energy => "energy",
        FinancialServices => "financial-services",
        Healthcare => "healthcare",
        Industrials => "industrials",
        RealEstate => "real-estate",
        Technology => "technology",
        Utilities => "utilities",
    }
}

closed_set! {
    /// Kind of ranking returned by `get_top`.
    TopType ("top_type") {
        TopEtfs => "top_etfs",
        TopMutualFunds => "top_mutual_funds",
        TopCompanies => "top_companies",
        /// Growth leaders grouped by industry.
        TopGrowthCompanies => "top_growth_companies",
        /// Performance leaders grouped by industry.
        TopPerformingCompanies => "top_performing_companies",
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::OneMonth
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::OneDay
    }
}

impl SearchType {
    /// Parses a search selector ignoring ASCII case.
    ///
    /// # Errors
    /// Returns `UnknownVariant` when the selector is not one of the known values.
    pub fn parse_selector(value: &str) -> Result<Self, UnknownVariant> {
        value
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| UnknownVariant {
                kind: "search_type",
                value: value.to_string(),
            })
    }
}
