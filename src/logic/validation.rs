use crate::error::ValidationError;
use crate::logic::grid::empty_cells;
use crate::models::{
    field::FieldRecord,
    flower::{FlowerRecord, Hardiness, Sunlight},
    request::{CreateFieldRequest, Dimension, FlowerForm},
};

/// Checks a new-field request and builds the document to store, with every
/// cell of the grid present and empty.
pub fn validate_new_field(request: &CreateFieldRequest) -> Result<FieldRecord, ValidationError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyFieldName);
    }
    let rows = count(&request.rows, "Rows")?;
    let cols = count(&request.cols, "Columns")?;
    Ok(FieldRecord {
        name: request.name.clone(),
        rows,
        cols,
        grid: empty_cells(rows, cols),
    })
}

fn count(dimension: &Dimension, axis: &'static str) -> Result<usize, ValidationError> {
    dimension
        .as_count()
        .ok_or_else(|| ValidationError::InvalidDimension {
            axis,
            value: dimension.to_string(),
        })
}

/// Checks a flower form and converts it to a document body. The image is
/// handled separately.
pub fn validate_flower_form(form: &FlowerForm) -> Result<FlowerRecord, ValidationError> {
    if form.common_name.trim().is_empty() {
        return Err(ValidationError::EmptyFlowerName);
    }
    let hardiness = Hardiness {
        min: hardiness_bound(&form.hardiness_min, "min")?,
        max: hardiness_bound(&form.hardiness_max, "max")?,
    };
    Ok(FlowerRecord {
        common_name: Some(form.common_name.clone()),
        scientific_name: Some(form.scientific_name.clone()),
        cycle: Some(form.cycle.clone()),
        watering: Some(form.watering.clone()),
        sunlight: Some(Sunlight::One(form.sunlight.clone())),
        hardiness: Some(hardiness),
        flowering_season: Some(form.flowering_season.clone()),
        description: Some(form.description.clone()),
        default_image: None,
    })
}

/// Blank means 0.
fn hardiness_bound(text: &str, bound: &'static str) -> Result<f64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidHardiness {
            bound,
            value: text.to_string(),
        })
}
