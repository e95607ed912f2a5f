//! Form catalog commands.

use crate::Result;
use crate::cli::FormCommands;
use crate::output::forms_table;

use super::{Context, report};

pub async fn handle(action: &FormCommands, ctx: &Context) -> Result<()> {
    let mut console = ctx.console()?;
    match action {
        FormCommands::List => {
            console.load_catalog().await;
            report(&mut console)?;
            let catalog = console.catalog();
            ctx.format
                .print(catalog.forms(), || forms_table(catalog.forms(), &catalog.summary()))?;
        }
        FormCommands::Create { title, description } => {
            let created = console.create_form(title, description).await;
            report(&mut console)?;
            if let Some(form) = created {
                ctx.format
                    .print(&form, || forms_table(std::slice::from_ref(&form), "Created"))?;
            }
        }
        FormCommands::Delete { id } => {
            console.delete_form(id).await;
            report(&mut console)?;
        }
    }
    Ok(())
}
