use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MedicineDoc {
    pub name: String,
    /// `£` plus two decimals, or `Price Not Available`
    pub price: String,
}

#[derive(ToSchema)]
pub struct MedicineListDoc { pub medicines: Vec<MedicineDoc> }

#[derive(ToSchema)]
pub struct MedicineFormDoc { pub name: String, pub price: String }

#[derive(ToSchema)]
pub struct NameFormDoc { pub name: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct AveragePriceDoc { pub average_price: String }

#[derive(ToSchema)]
pub struct DomainErrorDoc { pub status: String, pub code: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::medicines::list_medicines,
        crate::routes::medicines::get_medicine,
        crate::routes::medicines::create_medicine,
        crate::routes::medicines::update_medicine,
        crate::routes::medicines::delete_medicine,
        crate::routes::medicines::average_price,
    ),
    components(
        schemas(
            HealthResponse,
            MedicineDoc,
            MedicineListDoc,
            MedicineFormDoc,
            NameFormDoc,
            MessageDoc,
            AveragePriceDoc,
            DomainErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "medicines")
    )
)]
pub struct ApiDoc;
