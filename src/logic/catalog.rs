use chrono::{DateTime, Utc};

use crate::error::BedError;
use crate::logic::validation::validate_flower_form;
use crate::models::{
    flower::{Flower, FlowerImage},
    request::FlowerForm,
};
use crate::search::SpeciesSearch;
use crate::store::{objects::image_key, CatalogStore, ObjectStore};

/// Creates (`id` = `None`) or updates a flower from its form.
///
/// When `image` is given it is uploaded first and its URL becomes the
/// flower's image. An update without a new image keeps the stored one.
pub async fn save_flower(
    store: &dyn CatalogStore,
    objects: &dyn ObjectStore,
    id: Option<&str>,
    form: &FlowerForm,
    image: Option<Vec<u8>>,
    now: DateTime<Utc>,
) -> Result<Flower, BedError> {
    let mut record = validate_flower_form(form)?;

    if let Some(bytes) = image {
        let url = objects.upload(&image_key(now), bytes).await?;
        record.default_image = Some(FlowerImage::single(url));
    }

    let flower = match id {
        Some(id) => {
            if record.default_image.is_none() {
                record.default_image = store.get_flower(id).await?.record.default_image;
            }
            store.update_flower(id, record).await?
        }
        None => store.create_flower(record).await?,
    };
    log::info!("saved flower {} '{}'", flower.id, flower.name());
    Ok(flower)
}

/// Uploads an image for an existing flower and records its URL.
pub async fn attach_image(
    store: &dyn CatalogStore,
    objects: &dyn ObjectStore,
    id: &str,
    bytes: Vec<u8>,
    now: DateTime<Utc>,
) -> Result<Flower, BedError> {
    let mut record = store.get_flower(id).await?.record;
    let url = objects.upload(&image_key(now), bytes).await?;
    record.default_image = Some(FlowerImage::single(url));
    Ok(store.update_flower(id, record).await?)
}

/// Copies a species from the search API into the flower catalog.
///
/// Returns `None` when the species has no common name, in which case nothing
/// is written.
pub async fn save_species(
    store: &dyn CatalogStore,
    species: &dyn SpeciesSearch,
    species_id: u64,
) -> Result<Option<Flower>, BedError> {
    let detail = species.details(species_id).await?;
    if detail.common_name.trim().is_empty() {
        log::warn!("species {species_id} has no common name, not saved");
        return Ok(None);
    }
    let flower = store.create_flower(detail.into()).await?;
    log::info!("saved species {species_id} as flower {}", flower.id);
    Ok(Some(flower))
}
