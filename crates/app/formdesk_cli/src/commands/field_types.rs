//! Field type reference.

use formdesk_core::field_types::FieldType;

use crate::Result;
use crate::output::{FieldTypeRow, field_types_table};

use super::Context;

pub fn handle(name: Option<&str>, ctx: &Context) -> Result<()> {
    let rows: Vec<FieldTypeRow> = match name {
        Some(name) => vec![name.parse::<FieldType>()?.into()],
        None => FieldType::ALL.iter().copied().map(Into::into).collect(),
    };
    ctx.format.print(&rows, || field_types_table(&rows))
}
