use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MedicineDoc { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct CatalogDoc { pub medicines: Vec<MedicineDoc> }

#[derive(ToSchema)]
pub struct MedicineFormDoc { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct NameFormDoc { pub name: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct AveragePriceDoc { pub average_price: Option<f64>, pub count: usize }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::medicines::list_all,
        crate::routes::medicines::get_by_name,
        crate::routes::medicines::create,
        crate::routes::medicines::update,
        crate::routes::medicines::delete,
        crate::routes::medicines::average_price,
    ),
    components(
        schemas(
            HealthResponse,
            MedicineDoc,
            CatalogDoc,
            MedicineFormDoc,
            NameFormDoc,
            MessageDoc,
            ErrorDoc,
            AveragePriceDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "medicines")
    )
)]
pub struct ApiDoc;
