use dmpgen_core::{ManagementPlanDoc, PDF_MIME, file_path};

use crate::errors::GenerationError;
use crate::faker::Faker;

pub const PLAN_VERSIONS: &[&str] = &["1.0", "2.0", "2.1"];
pub const TEMPLATES: &[&str] = &["DMP OPIDoR v3", "Science Europe"];
const SIZE_RANGE: (u64, u64) = (100_000, 2_000_000);

/// `PGD_<dataset_id>_v<version>.pdf`
pub fn plan_file_name(dataset_id: u32, version: &str) -> String {
    format!("PGD_{dataset_id}_v{version}.pdf")
}

pub fn build_management_plan(
    faker: &mut Faker<'_>,
    dataset_id: u32,
) -> Result<ManagementPlanDoc, GenerationError> {
    let version = faker.pick_string("plan.version", PLAN_VERSIONS)?;
    let file_name = plan_file_name(dataset_id, &version);

    Ok(ManagementPlanDoc {
        file_path: file_path(dataset_id, &file_name),
        file_name,
        size_bytes: faker.int_in("plan.size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?,
        mime_type: PDF_MIME.to_string(),
        plan_version: version,
        template_used: faker.pick_string("plan.template", TEMPLATES)?,
    })
}
