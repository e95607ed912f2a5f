//! Step builder commands.

use formdesk_core::FormError;
use formdesk_core::builder::StepEditor;
use formdesk_core::console::Console;
use formdesk_core::models::Step;
use formdesk_core::validation::validate_step;

use crate::cli::StepCommands;
use crate::output::steps_table;
use crate::{Error, Result};

use super::{Context, read_document, report};

pub async fn handle(action: &StepCommands, ctx: &Context) -> Result<()> {
    match action {
        StepCommands::List { form } => {
            let console = ctx.console_on_form(form).await?;
            print_steps(&console, ctx)?;
        }
        StepCommands::Add { form, file } => {
            let mut step: Step = read_document(file)?;
            step.id = None;
            let mut console = ctx.console_on_form(form).await?;
            edit_and_save(&mut console, None, step).await?;
            print_steps(&console, ctx)?;
        }
        StepCommands::Update { form, step, file } => {
            let mut draft: Step = read_document(file)?;
            draft.id = Some(step.clone());
            let mut console = ctx.console_on_form(form).await?;
            let index = listed_steps(&console)
                .iter()
                .position(|s| s.identity() == Some(step.as_str()))
                .ok_or_else(|| Error::Custom(format!("Step {step} not found in form {form}")))?;
            edit_and_save(&mut console, Some(index), draft).await?;
            print_steps(&console, ctx)?;
        }
        StepCommands::Delete { form, step } => {
            let mut console = ctx.console_on_form(form).await?;
            console.delete_step(step).await;
            report(&mut console)?;
        }
        StepCommands::Check { file } => {
            let step: Step = read_document(file)?;
            validate_step(&step).map_err(FormError::from)?;
            log::info!(
                "Step '{}' is valid ({} fields)",
                step.step_title,
                step.fields.len()
            );
        }
    }
    Ok(())
}

/// Open the editor on `existing` (or a new step), replace its draft and save.
async fn edit_and_save(console: &mut Console, existing: Option<usize>, draft: Step) -> Result<()> {
    if let Some(editor) = console.open_step_editor(existing) {
        *editor = StepEditor::from_step(&draft);
    }
    report(console)?;
    console.save_step().await;
    report(console)
}

fn listed_steps(console: &Console) -> &[Step] {
    console.builder().map(|b| b.steps()).unwrap_or_default()
}

fn print_steps(console: &Console, ctx: &Context) -> Result<()> {
    let steps = listed_steps(console);
    ctx.format.print(steps, || steps_table(steps))
}
