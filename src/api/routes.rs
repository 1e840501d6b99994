use actix_web::web;

use crate::api::handlers::{fields, flowers, session, species};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(fields::confirm_deletion)
            .service(fields::cancel_deletion)
            .service(fields::list_fields)
            .service(fields::create_field)
            .service(fields::select_for_deletion)
            .service(session::open_session)
            .service(session::get_session)
            .service(session::select_flower)
            .service(session::toggle_cell)
            .service(session::clear_grid)
            .service(session::save_session)
            .service(session::close_session)
            .service(flowers::list_flowers)
            .service(flowers::create_flower)
            .service(flowers::get_flower)
            .service(flowers::update_flower)
            .service(flowers::upload_image)
            .service(flowers::delete_flower)
            .service(species::search_species)
            .service(species::get_species)
            .service(species::save_species_as_flower),
    );
}
