//! Static sector to industry table.
//!
//! Industry keys are the identifiers the provider accepts on its industry
//! endpoint. Each industry belongs to exactly one sector.

use crate::params::Sector;

pub const BASIC_MATERIALS: &[&str] = &[
    "specialty-chemicals",
    "gold",
    "building-materials",
    "copper",
    "steel",
    "agricultural-inputs",
    "chemicals",
    "other-industrial-metals-mining",
    "lumber-wood-production",
    "aluminum",
    "other-precious-metals-mining",
    "coking-coal",
    "paper-paper-products",
    "silver",
];

pub const COMMUNICATION_SERVICES: &[&str] = &[
    "internet-content-information",
    "telecom-services",
    "entertainment",
    "electronic-gaming-multimedia",
    "advertising-agencies",
    "broadcasting",
    "publishing",
];

pub const CONSUMER_CYCLICAL: &[&str] = &[
    "internet-retail",
    "auto-manufacturers",
    "restaurants",
    "home-improvement-retail",
    "travel-services",
    "specialty-retail",
    "apparel-retail",
    "residential-construction",
    "footwear-accessories",
    "packaging-containers",
    "lodging",
    "auto-parts",
    "auto-truck-dealerships",
    "gambling",
    "resorts-casinos",
    "leisure",
    "apparel-manufacturing",
    "personal-services",
    "furnishings-fixtures-appliances",
    "recreational-vehicles",
    "luxury-goods",
    "department-stores",
    "textile-manufacturing",
];

pub const CONSUMER_DEFENSIVE: &[&str] = &[
    "discount-stores",
    "beverages-non-alcoholic",
    "household-personal-products",
    "packaged-foods",
    "tobacco",
    "confectioners",
    "farm-products",
    "food-distribution",
    "grocery-stores",
    "beverages-brewers",
    "education-training-services",
    "beverages-wineries-distilleries",
];

pub const ENERGY: &[&str] = &[
    "oil-gas-integrated",
    "oil-gas-midstream",
    "oil-gas-e-p",
    "oil-gas-equipment-services",
    "oil-gas-refining-marketing",
    "uranium",
    "oil-gas-drilling",
    "thermal-coal",
];

pub const FINANCIAL_SERVICES: &[&str] = &[
    "banks-diversified",
    "credit-services",
    "asset-management",
    "insurance-diversified",
    "banks-regional",
    "capital-markets",
    "financial-data-stock-exchanges",
    "insurance-property-casualty",
    "insurance-brokers",
    "insurance-life",
    "insurance-specialty",
    "mortgage-finance",
    "insurance-reinsurance",
    "shell-companies",
    "financial-conglomerates",
];

pub const HEALTHCARE: &[&str] = &[
    "drug-manufacturers-general",
    "healthcare-plans",
    "biotechnology",
    "medical-devices",
    "diagnostics-research",
    "medical-instruments-supplies",
    "medical-care-facilities",
    "drug-manufacturers-specialty-generic",
    "health-information-services",
    "medical-distribution",
    "pharmaceutical-retailers",
];

pub const INDUSTRIALS: &[&str] = &[
    "aerospace-defense",
    "specialty-industrial-machinery",
    "railroads",
    "building-products-equipment",
    "farm-heavy-construction-machinery",
    "specialty-business-services",
    "integrated-freight-logistics",
    "waste-management",
    "conglomerates",
    "industrial-distribution",
    "engineering-construction",
    "rental-leasing-services",
    "consulting-services",
    "trucking",
    "electrical-equipment-parts",
    "airlines",
    "tools-accessories",
    "pollution-treatment-controls",
    "security-protection-services",
    "marine-shipping",
    "metal-fabrication",
    "infrastructure-operations",
    "staffing-employment-services",
    "airports-air-services",
    "business-equipment-supplies",
];

pub const REAL_ESTATE: &[&str] = &[
    "reit-specialty",
    "reit-industrial",
    "reit-retail",
    "reit-residential",
    "reit-healthcare-facilities",
    "real-estate-services",
    "reit-office",
    "reit-diversified",
    "reit-mortgage",
    "reit-hotel-motel",
    "real-estate-development",
    "real-estate-diversified",
];

pub const TECHNOLOGY: &[&str] = &[
    "software-infrastructure",
    "semiconductors",
    "consumer-electronics",
    "software-application",
    "information-technology-services",
    "semiconductor-equipment-materials",
    "communication-equipment",
    "computer-hardware",
    "electronic-components",
    "scientific-technical-instruments",
    "solar",
    "electronics-computer-distribution",
];

pub const UTILITIES: &[&str] = &[
    "utilities-regulated-electric",
    "utilities-renewable",
    "utilities-diversified",
    "utilities-regulated-gas",
    "utilities-independent-power-producers",
    "utilities-regulated-water",
];

/// Returns the industry keys that make up a sector.
#[must_use]
pub const fn industries(sector: Sector) -> &'static [&'static str] {
    match sector {
        Sector::BasicMaterials => BASIC_MATERIALS,
        Sector::CommunicationServices => COMMUNICATION_SERVICES,
        Sector::ConsumerCyclical => CONSUMER_CYCLICAL,
        Sector::ConsumerDefensive => CONSUMER_DEFENSIVE,
        Sector::Energy => ENERGY,
        Sector::FinancialServices => FINANCIAL_SERVICES,
        Sector::Healthcare => HEALTHCARE,
        Sector::Industrials => INDUSTRIALS,
        Sector::RealEstate => REAL_ESTATE,
        Sector::Technology => TECHNOLOGY,
        Sector::Utilities => UTILITIES,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_sector_has_industries() {
        for sector in Sector::ALL {
            assert!(!industries(*sector).is_empty(), "{sector} has no industries");
        }
    }

    #[test]
    fn industries_belong_to_one_sector() {
        let mut seen = HashSet::new();
        for sector in Sector::ALL {
            for industry in industries(*sector) {
                assert!(seen.insert(*industry), "{industry} listed twice");
            }
        }
    }
}
