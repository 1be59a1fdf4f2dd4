use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use yfin_types::{IndustryOverview, RankedEntity, Sector, TopType, sectors};

use crate::normalize::{symbol_lines, top_records};
use crate::provider::MarketDataProvider;

use super::{ControlError, INVALID_TOP_N, YfinControlPlane, error_payload};

/// Per-industry ranking table used by the grouped resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndustryRanking {
    Growth,
    Performing,
}

impl IndustryRanking {
    const fn field(self) -> &'static str {
        match self {
            Self::Growth => TopType::TopGrowthCompanies.as_str(),
            Self::Performing => TopType::TopPerformingCompanies.as_str(),
        }
    }

    fn select(self, overview: IndustryOverview) -> Option<Vec<RankedEntity>> {
        match self {
            Self::Growth => overview.top_growth_companies,
            Self::Performing => overview.top_performing_companies,
        }
    }
}

impl<P: MarketDataProvider> YfinControlPlane<P> {
    /// Resolves one of the five top-entity rankings for a sector.
    ///
    /// A non-positive `top_n` short-circuits before any provider call.
    ///
    /// # Errors
    /// Returns `ControlError` if the ETF or mutual fund sector query fails, or
    /// if a ranking table cannot be serialized.
    pub async fn get_top(
        &self,
        sector: Sector,
        top_type: TopType,
        top_n: i64,
    ) -> Result<String, ControlError> {
        let Some(top_n) = positive_count(top_n) else {
            return Ok(INVALID_TOP_N.to_string());
        };

        match top_type {
            TopType::TopEtfs => {
                let overview = self.provider.sector(sector).await?;
                Ok(symbol_lines(&overview.top_etfs, top_n))
            }
            TopType::TopMutualFunds => {
                let overview = self.provider.sector(sector).await?;
                Ok(symbol_lines(&overview.top_mutual_funds, top_n))
            }
            TopType::TopCompanies => self.top_companies(sector, top_n).await,
            TopType::TopGrowthCompanies => {
                self.top_by_industry(sector, IndustryRanking::Growth, top_n).await
            }
            TopType::TopPerformingCompanies => {
                self.top_by_industry(sector, IndustryRanking::Performing, top_n)
                    .await
            }
        }
    }

    async fn top_companies(&self, sector: Sector, top_n: usize) -> Result<String, ControlError> {
        let overview = match self.provider.sector(sector).await {
            Ok(overview) => overview,
            Err(err) => {
                warn!(%sector, error = %err, "sector query for top companies failed");
                return Ok(error_payload(format!(
                    "Failed to get top companies for sector '{sector}': {err}"
                )));
            }
        };

        let Some(companies) = overview.top_companies else {
            return Ok(error_payload(format!(
                "No top companies available for {sector} sector."
            )));
        };

        Ok(top_records(&companies, top_n)?)
    }

    /// Queries every industry in the sector in order. A failing industry adds
    /// an error entry and the remaining industries are still queried.
    async fn top_by_industry(
        &self,
        sector: Sector,
        ranking: IndustryRanking,
        top_n: usize,
    ) -> Result<String, ControlError> {
        let industries = sectors::industries(sector);
        let mut entries = Vec::with_capacity(industries.len());

        for industry in industries {
            let overview = match self.provider.industry(industry).await {
                Ok(overview) => overview,
                Err(err) => {
                    warn!(%sector, industry, error = %err, "industry query failed");
                    entries.push(json!({ "industry": industry, "error": err.to_string() }));
                    continue;
                }
            };

            let Some(table) = ranking.select(overview) else {
                debug!(%sector, industry, field = ranking.field(), "industry has no ranking table");
                continue;
            };

            let mut entry = Map::new();
            entry.insert("industry".to_string(), Value::String((*industry).to_string()));
            entry.insert(
                ranking.field().to_string(),
                Value::String(top_records(&table, top_n)?),
            );
            entries.push(Value::Object(entry));
        }

        Ok(serde_json::to_string(&entries)?)
    }
}

fn positive_count(top_n: i64) -> Option<usize> {
    usize::try_from(top_n).ok().filter(|count| *count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_must_be_positive() {
        assert_eq!(positive_count(0), None);
        assert_eq!(positive_count(-3), None);
        assert_eq!(positive_count(5), Some(5));
    }

    #[test]
    fn ranking_fields_match_top_types() {
        assert_eq!(IndustryRanking::Growth.field(), "top_growth_companies");
        assert_eq!(IndustryRanking::Performing.field(), "top_performing_companies");
    }
}
