use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateBrandDoc { pub name: String, pub logo: Option<String> }

#[derive(ToSchema)]
pub struct UpdateBrandDoc { pub name: Option<String>, pub logo: Option<String> }

#[derive(ToSchema)]
pub struct ReorderDoc { pub order: Vec<Uuid> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReorderModelsDoc { pub brand_id: Uuid, pub order: Vec<Uuid> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateModelDoc {
    pub brand_id: Uuid,
    pub name: String,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    /// phone, tablet or other
    pub device_kind: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateModelDoc {
    /// Moving to another brand appends the model to that brand's order
    pub brand_id: Option<Uuid>,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub device_kind: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateRepairDoc {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub icon: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateRepairDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub icon: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RepairPriceDoc {
    pub type_naam: String,
    /// Number or numeric string; blank or negative rows are ignored
    pub prijs: Option<f64>,
    pub verborgen: Option<bool>,
}

#[derive(ToSchema)]
pub struct SetPricesDoc { pub reparaties: Vec<RepairPriceDoc> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookingDoc {
    pub model_id: Uuid,
    pub repair_type_ids: Vec<Uuid>,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
pub struct ContactDoc { pub name: String, pub email: String, pub phone: Option<String>, pub message: String }

pub struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::brands::list,
        crate::routes::brands::get,
        crate::routes::brands::create,
        crate::routes::brands::update,
        crate::routes::brands::delete,
        crate::routes::brands::reorder,
        crate::routes::device_models::list,
        crate::routes::device_models::get,
        crate::routes::device_models::create,
        crate::routes::device_models::update,
        crate::routes::device_models::delete,
        crate::routes::device_models::reorder,
        crate::routes::device_models::repairs,
        crate::routes::device_models::set_prices,
        crate::routes::repairs::list,
        crate::routes::repairs::get,
        crate::routes::repairs::create,
        crate::routes::repairs::update,
        crate::routes::repairs::delete,
        crate::routes::repairs::reorder,
        crate::routes::intake::booking,
        crate::routes::intake::contact,
        crate::routes::bookings::list,
        crate::routes::bookings::get,
    ),
    components(
        schemas(
            HealthResponse,
            CreateBrandDoc,
            UpdateBrandDoc,
            ReorderDoc,
            ReorderModelsDoc,
            CreateModelDoc,
            UpdateModelDoc,
            CreateRepairDoc,
            UpdateRepairDoc,
            RepairPriceDoc,
            SetPricesDoc,
            BookingDoc,
            ContactDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "catalog"),
        (name = "pricing"),
        (name = "intake")
    )
)]
pub struct ApiDoc;
