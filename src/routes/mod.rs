// Route exports
pub mod products;

use actix_web::web;

use crate::services::CatalogStore;

pub fn configure_routes<S: CatalogStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(products::configure::<S>),
    );
}
