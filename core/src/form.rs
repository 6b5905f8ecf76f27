//! Editable draft behind the create/edit planner form.
//!
//! # Design
//! `PlannerForm` owns exactly one [`DraftForm`]. Opening the form for create
//! seeds a blank template; opening it for edit copies an existing record.
//! [`PlannerForm::submit`] hands the draft out as a [`Submission`] and always
//! resets to a blank, closed form, whether the form was creating or editing.
//!
//! The form does not track in-flight submissions. Callers that must prevent a
//! double submit gate on `PlannerStore::is_pending`.

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;
use crate::types::{DraftForm, PlannerId, PlannerRecord};

/// Scalar draft fields addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    StartDate,
    EndDate,
    Location,
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Field::Title),
            "description" => Ok(Field::Description),
            "startDate" | "start_date" => Ok(Field::StartDate),
            "endDate" | "end_date" => Ok(Field::EndDate),
            "location" => Ok(Field::Location),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::Location => "location",
        })
    }
}

/// What the open form will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PlannerId),
}

/// A submitted draft, ready for `PlannerStore::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(DraftForm),
    Update { id: PlannerId, draft: DraftForm },
}

/// Form state controller: `Closed`, or open for create or edit.
#[derive(Debug, Clone, Default)]
pub struct PlannerForm {
    mode: Option<FormMode>,
    draft: DraftForm,
}

impl PlannerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn mode(&self) -> Option<&FormMode> {
        self.mode.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    /// `Closed -> Open(blank)`.
    pub fn open_create(&mut self) {
        self.initialize(None);
        self.mode = Some(FormMode::Create);
    }

    /// `Closed -> Open(seeded)`.
    pub fn open_edit(&mut self, record: &PlannerRecord) {
        self.initialize(Some(record));
        self.mode = Some(FormMode::Edit(record.id.clone()));
    }

    /// Seed the draft from `record`, or reset it to the blank template.
    ///
    /// Leaves the open/closed state alone.
    pub fn initialize(&mut self, record: Option<&PlannerRecord>) {
        self.draft = record.map(DraftForm::from).unwrap_or_default();
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            Field::Title => &mut self.draft.title,
            Field::Description => &mut self.draft.description,
            Field::StartDate => &mut self.draft.start_date,
            Field::EndDate => &mut self.draft.end_date,
            Field::Location => &mut self.draft.location,
        };
        *slot = value;
    }

    /// Set a field by its wire or snake_case name.
    pub fn set_field_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Replace the slot at `index`, or append when `index` is `None`.
    pub fn set_participant(
        &mut self,
        index: Option<usize>,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let participants = &mut self.draft.participants;
        match index {
            None => participants.push(value.into()),
            Some(i) if i < participants.len() => participants[i] = value.into(),
            Some(i) => {
                return Err(FormError::ParticipantOutOfRange {
                    index: i,
                    len: participants.len(),
                })
            }
        }
        Ok(())
    }

    pub fn add_participant(&mut self) {
        self.draft.participants.push(String::new());
    }

    /// Whether a remove control should be offered.
    pub fn can_remove_participant(&self) -> bool {
        self.draft.participants.len() > 1
    }

    /// Remove the slot at `index`. The last remaining slot cannot be removed.
    pub fn remove_participant(&mut self, index: usize) -> Result<String, FormError> {
        let len = self.draft.participants.len();
        if index >= len {
            return Err(FormError::ParticipantOutOfRange { index, len });
        }
        if len <= 1 {
            return Err(FormError::LastParticipant);
        }
        Ok(self.draft.participants.remove(index))
    }

    /// Replace every participant slot, keeping at least one.
    pub fn set_participants<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft.participants = names.into_iter().map(Into::into).collect();
        if self.draft.participants.is_empty() {
            self.add_participant();
        }
    }

    /// Hand out the draft and reset to a blank, closed form.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let mode = self.mode.take().ok_or(FormError::NotOpen)?;
        let draft = std::mem::take(&mut self.draft);
        Ok(match mode {
            FormMode::Create => Submission::Create(draft),
            FormMode::Edit(id) => Submission::Update { id, draft },
        })
    }

    /// `Open(*) -> Closed`, discarding the draft.
    pub fn cancel(&mut self) {
        self.mode = None;
        self.initialize(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlannerRecord {
        PlannerRecord {
            id: PlannerId::Number(3),
            title: "Ski trip".to_string(),
            description: "Powder days".to_string(),
            start_date: "2024-01-10".to_string(),
            end_date: "2024-01-17".to_string(),
            location: "Aspen".to_string(),
            participants: vec!["Ana".to_string(), "Bo".to_string()],
        }
    }

    #[test]
    fn new_form_is_closed_and_blank() {
        let form = PlannerForm::new();
        assert!(!form.is_open());
        assert_eq!(form.draft(), &DraftForm::blank());
    }

    #[test]
    fn open_create_seeds_blank_template() {
        let mut form = PlannerForm::new();
        form.set_field(Field::Title, "leftover");
        form.open_create();
        assert_eq!(form.mode(), Some(&FormMode::Create));
        assert_eq!(form.draft(), &DraftForm::blank());
    }

    #[test]
    fn open_edit_copies_record() {
        let mut form = PlannerForm::new();
        form.open_edit(&record());
        assert_eq!(form.mode(), Some(&FormMode::Edit(PlannerId::Number(3))));
        assert_eq!(form.draft().title, "Ski trip");
        assert_eq!(form.draft().participants, vec!["Ana", "Bo"]);
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut form = PlannerForm::new();
        form.initialize(Some(&record()));
        let first = form.draft().clone();
        form.initialize(Some(&record()));
        assert_eq!(form.draft(), &first);
    }

    #[test]
    fn initialize_defaults_missing_participants() {
        let mut sparse = record();
        sparse.participants.clear();
        let mut form = PlannerForm::new();
        form.initialize(Some(&sparse));
        assert_eq!(form.draft().participants, vec![String::new()]);
    }

    #[test]
    fn set_field_by_name() {
        let mut form = PlannerForm::new();
        form.set_field_named("startDate", "2024-02-01").unwrap();
        form.set_field_named("end_date", "2024-02-03").unwrap();
        assert_eq!(form.draft().start_date, "2024-02-01");
        assert_eq!(form.draft().end_date, "2024-02-03");
    }

    #[test]
    fn set_field_rejects_unknown_name() {
        let mut form = PlannerForm::new();
        let err = form.set_field_named("budget", "100").unwrap_err();
        assert_eq!(err, FormError::UnknownField("budget".to_string()));
        assert!("participants".parse::<Field>().is_err());
    }

    #[test]
    fn set_participant_replaces_or_appends() {
        let mut form = PlannerForm::new();
        form.set_participant(Some(0), "Ana").unwrap();
        form.set_participant(None, "Bo").unwrap();
        assert_eq!(form.draft().participants, vec!["Ana", "Bo"]);

        let err = form.set_participant(Some(5), "Cy").unwrap_err();
        assert_eq!(err, FormError::ParticipantOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn remove_never_drops_below_one_slot() {
        let mut form = PlannerForm::new();
        assert!(!form.can_remove_participant());
        assert_eq!(form.remove_participant(0), Err(FormError::LastParticipant));
        assert_eq!(form.draft().participants.len(), 1);
    }

    #[test]
    fn add_then_remove_last_restores_slots() {
        let mut form = PlannerForm::new();
        form.open_edit(&record());
        let before = form.draft().participants.clone();

        form.add_participant();
        assert!(form.can_remove_participant());
        let last = form.draft().participants.len() - 1;
        assert_eq!(form.remove_participant(last).unwrap(), "");
        assert_eq!(form.draft().participants, before);
    }

    #[test]
    fn set_participants_keeps_one_slot() {
        let mut form = PlannerForm::new();
        form.set_participants(Vec::<String>::new());
        assert_eq!(form.draft().participants, vec![String::new()]);
        form.set_participants(["Ana", "", "Cy"]);
        assert_eq!(form.draft().participants, vec!["Ana", "", "Cy"]);
    }

    #[test]
    fn submit_create_resets_to_closed_blank() {
        let mut form = PlannerForm::new();
        form.open_create();
        form.set_field(Field::Title, "Ski trip");

        let submission = form.submit().unwrap();
        match submission {
            Submission::Create(draft) => assert_eq!(draft.title, "Ski trip"),
            other => panic!("unexpected submission: {other:?}"),
        }
        assert!(!form.is_open());
        assert_eq!(form.draft(), &DraftForm::blank());
    }

    #[test]
    fn submit_edit_carries_id_and_resets_to_blank() {
        let mut form = PlannerForm::new();
        form.open_edit(&record());
        form.set_field(Field::Location, "Vail");

        let submission = form.submit().unwrap();
        let Submission::Update { id, draft } = submission else {
            panic!("expected update");
        };
        assert_eq!(id, PlannerId::Number(3));
        assert_eq!(draft.location, "Vail");
        assert_eq!(form.draft(), &DraftForm::blank());
    }

    #[test]
    fn submit_on_closed_form_is_rejected() {
        let mut form = PlannerForm::new();
        assert_eq!(form.submit(), Err(FormError::NotOpen));
    }

    #[test]
    fn cancel_closes_and_discards() {
        let mut form = PlannerForm::new();
        form.open_edit(&record());
        form.cancel();
        assert!(!form.is_open());
        assert_eq!(form.draft(), &DraftForm::blank());
    }
}
