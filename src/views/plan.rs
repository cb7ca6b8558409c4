use crate::plans::{plan_features, Feature, Plan};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub plan: Plan,
    pub features: Vec<Feature>,
}

impl From<Plan> for Catalog {
    fn from(plan: Plan) -> Self {
        Self {
            plan,
            features: plan_features(plan).to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeatureAccess {
    pub plan: Plan,
    pub feature: Feature,
    pub included: bool,
}
