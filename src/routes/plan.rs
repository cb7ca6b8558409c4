use crate::helpers::JsonResponse;
use crate::plans::{self, Feature, Plan};
use crate::views;
use actix_web::{get, web, Responder, Result};

fn parse_plan(value: &str) -> Result<Plan> {
    value
        .parse::<Plan>()
        .map_err(|msg| JsonResponse::<views::plan::Catalog>::build().bad_request(msg))
}

fn parse_feature(value: &str) -> Result<Feature> {
    value
        .parse::<Feature>()
        .map_err(|msg| JsonResponse::<views::plan::Catalog>::build().bad_request(msg))
}

#[tracing::instrument(name = "List plans.")]
#[get("")]
pub async fn list_handler() -> Result<impl Responder> {
    let catalog = Plan::ALL
        .into_iter()
        .map(views::plan::Catalog::from)
        .collect::<Vec<_>>();

    Ok(JsonResponse::build().set_list(catalog).ok("OK"))
}

#[tracing::instrument(name = "Plan feature lookup.")]
#[get("/{plan}/feature/{feature}")]
pub async fn has_feature_handler(path: web::Path<(String, String)>) -> Result<impl Responder> {
    let (plan, feature) = path.into_inner();
    let plan = parse_plan(&plan)?;
    let feature = parse_feature(&feature)?;

    let item = views::plan::FeatureAccess {
        plan,
        feature,
        included: plans::plan_has_feature(plan, feature),
    };
    Ok(JsonResponse::build().set_item(item).ok("OK"))
}

#[tracing::instrument(name = "Minimum plan for feature.")]
#[get("/feature/{feature}/minimum")]
pub async fn minimum_plan_handler(path: web::Path<(String,)>) -> Result<impl Responder> {
    let feature = parse_feature(&path.into_inner().0)?;

    let item = views::plan::FeatureAccess {
        plan: plans::minimum_plan_for_feature(feature),
        feature,
        included: true,
    };
    Ok(JsonResponse::build().set_item(item).ok("OK"))
}
