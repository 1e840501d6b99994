use utoipa::OpenApi;

use crate::models::{
    field::{Field, FieldCell},
    flower::{Flower, FlowerImage, FlowerRecord, Hardiness, Sunlight},
    request::{
        CellView, CreateFieldRequest, DeletionState, Dimension, ErrorResponse, FlowerForm,
        Pagination, PaletteEntry, SelectFlowerRequest, SessionView,
    },
    species::{SpeciesDetail, SpeciesSummary},
    Coordinate,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flower Beds API",
        description = "Lay out flower beds as grids: manage fields, place flowers from your catalog on tiles, and import flowers from a species database.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::fields::list_fields,
        crate::api::handlers::fields::create_field,
        crate::api::handlers::fields::select_for_deletion,
        crate::api::handlers::fields::confirm_deletion,
        crate::api::handlers::fields::cancel_deletion,
        crate::api::handlers::session::open_session,
        crate::api::handlers::session::get_session,
        crate::api::handlers::session::select_flower,
        crate::api::handlers::session::toggle_cell,
        crate::api::handlers::session::clear_grid,
        crate::api::handlers::session::save_session,
        crate::api::handlers::session::close_session,
        crate::api::handlers::flowers::list_flowers,
        crate::api::handlers::flowers::get_flower,
        crate::api::handlers::flowers::create_flower,
        crate::api::handlers::flowers::update_flower,
        crate::api::handlers::flowers::upload_image,
        crate::api::handlers::flowers::delete_flower,
        crate::api::handlers::species::search_species,
        crate::api::handlers::species::get_species,
        crate::api::handlers::species::save_species_as_flower,
    ),
    components(
        schemas(
            // Fields
            Field, FieldCell, CreateFieldRequest, Dimension, DeletionState,
            // Editing session
            Coordinate, SelectFlowerRequest, SessionView, CellView, PaletteEntry,
            // Flowers
            Flower, FlowerRecord, FlowerImage, Hardiness, Sunlight, FlowerForm,
            // Species
            SpeciesSummary, SpeciesDetail,
            // Shared
            Pagination, ErrorResponse,
        )
    ),
    tags(
        (name = "fields",  description = "Flower beds: list, create, two-step delete"),
        (name = "session", description = "Editing a bed's grid: select a flower, toggle tiles, save"),
        (name = "flowers", description = "The user's flower catalog"),
        (name = "species", description = "Species database search and import"),
    )
)]
pub struct ApiDoc;
