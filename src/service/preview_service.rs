use std::collections::HashMap;

use crate::models::schedule::{RawScheduleFields, ScheduleWindow};

/// Advisory slot count for a schedule window. The server may create fewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEstimate {
    pub total_slots: u64,
    pub slots_per_day: u64,
    pub days_in_range: u64,
}

impl SlotEstimate {
    pub fn from_window(window: &ScheduleWindow) -> Self {
        Self {
            total_slots: window.total_slots(),
            slots_per_day: window.slots_per_day(),
            days_in_range: window.days_in_range(),
        }
    }

    pub fn message(&self) -> String {
        let day_noun = if self.days_in_range == 1 { "día" } else { "días" };
        format!(
            "Se crearán aproximadamente {} turnos ({} por día, durante {} {}).",
            self.total_slots, self.slots_per_day, self.days_in_range, day_noun
        )
    }
}

/// `None` means "not enough information": the preview stays hidden.
pub fn estimate(raw: &RawScheduleFields) -> Option<SlotEstimate> {
    ScheduleWindow::parse(raw).map(|window| SlotEstimate::from_window(&window))
}

/// Names of the form controls the preview reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBinding {
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub slot_duration: String,
}

impl Default for PreviewBinding {
    fn default() -> Self {
        Self {
            start_date: "fecha_inicio".to_string(),
            end_date: "fecha_fin".to_string(),
            start_time: "hora_inicio".to_string(),
            end_time: "hora_fin".to_string(),
            slot_duration: "duracion_turno".to_string(),
        }
    }
}

impl PreviewBinding {
    fn watched(&self) -> [&str; 5] {
        [
            self.start_date.as_str(),
            self.end_date.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
            self.slot_duration.as_str(),
        ]
    }
}

pub trait FormSnapshot {
    fn value(&self, field: &str) -> Option<String>;
}

impl FormSnapshot for HashMap<String, String> {
    fn value(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

pub trait PreviewPanel {
    fn show(&mut self, text: &str);
    fn hide(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub text: String,
}

impl PreviewPanel for PanelState {
    fn show(&mut self, text: &str) {
        self.text = text.to_string();
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

pub struct AvailabilityPreview {
    binding: PreviewBinding,
}

impl AvailabilityPreview {
    pub fn new(binding: PreviewBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &PreviewBinding {
        &self.binding
    }

    /// Whether a change to `field` should trigger `refresh`.
    pub fn watches(&self, field: &str) -> bool {
        self.binding.watched().contains(&field)
    }

    pub fn read_fields<F: FormSnapshot + ?Sized>(&self, form: &F) -> RawScheduleFields {
        let read = |name: &str| form.value(name).unwrap_or_default();
        RawScheduleFields {
            start_date: read(self.binding.start_date.as_str()),
            end_date: read(self.binding.end_date.as_str()),
            start_time: read(self.binding.start_time.as_str()),
            end_time: read(self.binding.end_time.as_str()),
            slot_duration: read(self.binding.slot_duration.as_str()),
        }
    }

    /// Recomputes from the current form values and updates the panel.
    pub fn refresh<F, P>(&self, form: &F, panel: &mut P) -> Option<SlotEstimate>
    where
        F: FormSnapshot + ?Sized,
        P: PreviewPanel + ?Sized,
    {
        let result = estimate(&self.read_fields(form));
        match &result {
            Some(slots) => panel.show(&slots.message()),
            None => panel.hide(),
        }
        result
    }
}
