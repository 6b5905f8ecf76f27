//! Command handlers: the list/detail view over the planner store.

use std::fs;

use anyhow::{bail, Context, Result};
use holiday_core::{
    printable_content, Field, PlannerForm, PlannerId, PlannerStore, Preferences, Refresh,
    Transport,
};
use log::{debug, info};

use crate::args::{Commands, PlannerFields, PrefsCommands};

/// Drives store and form operations for one CLI invocation.
pub struct Cli<'a, T> {
    store: &'a PlannerStore<T>,
    form: PlannerForm,
}

impl<'a, T: Transport> Cli<'a, T> {
    pub fn new(store: &'a PlannerStore<T>) -> Self {
        Self {
            store,
            form: PlannerForm::new(),
        }
    }

    pub async fn run(mut self, command: Commands) -> Result<()> {
        match command {
            Commands::List => self.list().await,
            Commands::Show { id } => self.show(&id).await,
            Commands::Create { fields } => self.create(fields).await,
            Commands::Edit { id, fields } => self.edit(&id, fields).await,
            Commands::Delete { id } => self.delete(&id).await,
            Commands::Print { id, output } => {
                let html = self.printable(&id).await?;
                match output {
                    Some(path) => {
                        fs::write(&path, html)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("Wrote {}", path.display());
                    }
                    None => print!("{html}"),
                }
                Ok(())
            }
            Commands::Prefs { .. } => bail!("preferences are handled without a backend"),
        }
    }

    async fn list(&self) -> Result<()> {
        self.store
            .fetch_all()
            .await
            .context("Failed to load holiday planners")?;
        self.render_list().await;
        Ok(())
    }

    async fn render_list(&self) {
        let planners = self.store.planners().await;
        if planners.is_empty() {
            println!("No holiday planners yet.");
            return;
        }
        let blocks: Vec<String> = planners.iter().map(ToString::to_string).collect();
        println!("{}", blocks.join("\n\n"));
    }

    async fn show(&self, id: &PlannerId) -> Result<()> {
        let record = self
            .store
            .fetch_one(id)
            .await
            .with_context(|| format!("Failed to load planner {id}"))?;
        println!("{record}");
        Ok(())
    }

    async fn create(&mut self, fields: PlannerFields) -> Result<()> {
        self.form.open_create();
        apply(&mut self.form, fields);
        self.submit("Created planner").await
    }

    async fn edit(&mut self, id: &PlannerId, fields: PlannerFields) -> Result<()> {
        let record = self
            .store
            .fetch_one(id)
            .await
            .with_context(|| format!("Failed to load planner {id}"))?;
        self.form.open_edit(&record);
        apply(&mut self.form, fields);
        self.submit("Updated planner").await
    }

    async fn submit(&mut self, done: &str) -> Result<()> {
        let submission = self.form.submit()?;
        debug!("submitting {submission:?}");
        let refresh = self
            .store
            .submit(&submission)
            .await
            .context("Failed to save holiday planner")?;
        info!("{done}; list refresh {refresh:?}");
        println!("{done}.");
        if refresh == Refresh::Applied {
            self.render_list().await;
        }
        Ok(())
    }

    async fn delete(&self, id: &PlannerId) -> Result<()> {
        let refresh = self
            .store
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete planner {id}"))?;
        println!("Deleted planner {id}.");
        if refresh == Refresh::Applied {
            self.render_list().await;
        }
        Ok(())
    }

    async fn printable(&self, id: &PlannerId) -> Result<String> {
        let record = self
            .store
            .fetch_one(id)
            .await
            .with_context(|| format!("Failed to load planner {id}"))?;
        Ok(printable_content(&record))
    }
}

/// Copy the options the user gave onto the open draft.
fn apply(form: &mut PlannerForm, fields: PlannerFields) {
    let PlannerFields {
        title,
        description,
        start_date,
        end_date,
        location,
        participants,
    } = fields;

    let scalars = [
        (Field::Title, title),
        (Field::Description, description),
        (Field::StartDate, start_date),
        (Field::EndDate, end_date),
        (Field::Location, location),
    ];
    for (field, value) in scalars {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }
    if !participants.is_empty() {
        form.set_participants(participants);
    }
}

pub fn handle_prefs(prefs: &Preferences, command: PrefsCommands) -> Result<()> {
    match command {
        PrefsCommands::Get { key } => match prefs.read_raw(&key) {
            Some(raw) => println!("{raw}"),
            None => println!("{key} is not set"),
        },
        PrefsCommands::Set { key, value } => {
            let value = serde_json::from_str::<serde_json::Value>(&value)
                .unwrap_or(serde_json::Value::String(value));
            prefs
                .write(&key, &value)
                .with_context(|| format!("Failed to store preference '{key}'"))?;
            println!("{key} = {value}");
        }
        PrefsCommands::Unset { key } => {
            let removed = prefs
                .remove(&key)
                .with_context(|| format!("Failed to remove preference '{key}'"))?;
            if removed {
                println!("Removed {key}");
            } else {
                println!("{key} is not set");
            }
        }
    }
    Ok(())
}
