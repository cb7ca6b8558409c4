//! Subscription tiers and the capabilities each one unlocks.
//!
//! The table below is the only business rule of plan gating. Every row repeats
//! the features of the row above it, so `FREE ⊆ BASIC ⊆ PRO ⊆ ENTERPRISE` can be
//! checked by reading it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Paid and free tiers, ordered by rank.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    Free,
    Basic,
    Pro,
    Enterprise,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    Inventory,
    WorkOrders,
    Clients,
    Receipts,
    Ecommerce,
    CustomBranding,
    ExportData,
    Chatbot,
    WhatsappNotifications,
    AdvancedAnalytics,
    Integrations,
    ApiAccess,
    MultiLocation,
    CustomAutomations,
    PrioritySupport,
}

const PLAN_FEATURES: [(Plan, &[Feature]); 4] = [
    (
        Plan::Free,
        &[
            Feature::Inventory,
            Feature::WorkOrders,
            Feature::Clients,
            Feature::Receipts,
        ],
    ),
    (
        Plan::Basic,
        &[
            Feature::Inventory,
            Feature::WorkOrders,
            Feature::Clients,
            Feature::Receipts,
            Feature::Ecommerce,
            Feature::CustomBranding,
            Feature::ExportData,
        ],
    ),
    (
        Plan::Pro,
        &[
            Feature::Inventory,
            Feature::WorkOrders,
            Feature::Clients,
            Feature::Receipts,
            Feature::Ecommerce,
            Feature::CustomBranding,
            Feature::ExportData,
            Feature::Chatbot,
            Feature::WhatsappNotifications,
            Feature::AdvancedAnalytics,
            Feature::Integrations,
        ],
    ),
    (
        Plan::Enterprise,
        &[
            Feature::Inventory,
            Feature::WorkOrders,
            Feature::Clients,
            Feature::Receipts,
            Feature::Ecommerce,
            Feature::CustomBranding,
            Feature::ExportData,
            Feature::Chatbot,
            Feature::WhatsappNotifications,
            Feature::AdvancedAnalytics,
            Feature::Integrations,
            Feature::ApiAccess,
            Feature::MultiLocation,
            Feature::CustomAutomations,
            Feature::PrioritySupport,
        ],
    ),
];

impl Plan {
    /// Ascending rank order.
    pub const ALL: [Plan; 4] = [Plan::Free, Plan::Basic, Plan::Pro, Plan::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "FREE",
            Plan::Basic => "BASIC",
            Plan::Pro => "PRO",
            Plan::Enterprise => "ENTERPRISE",
        }
    }
}

impl Feature {
    pub const ALL: [Feature; 15] = [
        Feature::Inventory,
        Feature::WorkOrders,
        Feature::Clients,
        Feature::Receipts,
        Feature::Ecommerce,
        Feature::CustomBranding,
        Feature::ExportData,
        Feature::Chatbot,
        Feature::WhatsappNotifications,
        Feature::AdvancedAnalytics,
        Feature::Integrations,
        Feature::ApiAccess,
        Feature::MultiLocation,
        Feature::CustomAutomations,
        Feature::PrioritySupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Inventory => "INVENTORY",
            Feature::WorkOrders => "WORK_ORDERS",
            Feature::Clients => "CLIENTS",
            Feature::Receipts => "RECEIPTS",
            Feature::Ecommerce => "ECOMMERCE",
            Feature::CustomBranding => "CUSTOM_BRANDING",
            Feature::ExportData => "EXPORT_DATA",
            Feature::Chatbot => "CHATBOT",
            Feature::WhatsappNotifications => "WHATSAPP_NOTIFICATIONS",
            Feature::AdvancedAnalytics => "ADVANCED_ANALYTICS",
            Feature::Integrations => "INTEGRATIONS",
            Feature::ApiAccess => "API_ACCESS",
            Feature::MultiLocation => "MULTI_LOCATION",
            Feature::CustomAutomations => "CUSTOM_AUTOMATIONS",
            Feature::PrioritySupport => "PRIORITY_SUPPORT",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown plan {s}"))
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown feature {s}"))
    }
}

/// Features unlocked by `plan`.
pub fn plan_features(plan: Plan) -> &'static [Feature] {
    PLAN_FEATURES
        .iter()
        .find(|(tier, _)| *tier == plan)
        .map(|(_, features)| *features)
        .unwrap_or(&[])
}

pub fn plan_has_feature(plan: Plan, feature: Feature) -> bool {
    plan_features(plan).contains(&feature)
}

/// Cheapest tier that includes `feature`. Falls back to the top tier so an
/// incomplete table still points callers at an upgrade.
pub fn minimum_plan_for_feature(feature: Feature) -> Plan {
    Plan::ALL
        .into_iter()
        .find(|plan| plan_has_feature(*plan, feature))
        .unwrap_or(Plan::Enterprise)
}
