//! Appointment booking: the doctor → vaccine filter and the booking form.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::backend::VaccineDirectory;
use crate::error::{FieldErrors, FlowError, Result};
use vax_client::{parse_time_of_day, AppointmentRequest, Vaccine};

pub const BOOKED: &str = "Appointment booked successfully";
pub const BOOKING_FAILED: &str = "Booking failed";

pub const TIME_FIELD: &str = "time";
pub const INVALID_TIME: &str = "Time must be HH:MM or HH:MM:SS";

/// Standard appointment slots: mornings and afternoons, every 30 minutes.
pub const TIME_SLOTS: [&str; 12] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", //
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30",
];

// =============================================================================
// Doctor → Vaccine filter
// =============================================================================

/// Vaccine choices narrowed to what the selected doctor administers.
pub struct VaccineFilter<D> {
    directory: D,
    doctor_id: Option<i64>,
    vaccines: Vec<Vaccine>,
    vaccine_id: Option<i64>,
}

impl<D: VaccineDirectory> VaccineFilter<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            doctor_id: None,
            vaccines: Vec::new(),
            vaccine_id: None,
        }
    }

    pub fn doctor_id(&self) -> Option<i64> {
        self.doctor_id
    }

    pub fn vaccines(&self) -> &[Vaccine] {
        &self.vaccines
    }

    pub fn vaccine_id(&self) -> Option<i64> {
        self.vaccine_id
    }

    pub fn selected_vaccine(&self) -> Option<&Vaccine> {
        let id = self.vaccine_id?;
        self.vaccines.iter().find(|v| v.id == id)
    }

    /// Change the doctor and reload the vaccine list.
    ///
    /// Always clears the vaccine selection. A failed fetch leaves the list
    /// empty; it is logged, not returned.
    pub async fn select_doctor(&mut self, doctor_id: Option<i64>) {
        self.doctor_id = doctor_id;
        self.vaccine_id = None;
        self.vaccines.clear();

        let Some(doctor_id) = doctor_id else {
            return;
        };

        match self.directory.vaccines_for_doctor(doctor_id).await {
            Ok(vaccines) => {
                debug!(doctor_id, count = vaccines.len(), "Loaded vaccines for doctor");
                self.vaccines = vaccines;
            }
            Err(e) => {
                warn!(doctor_id, error = %e, "Failed to load vaccines for doctor");
            }
        }
    }

    /// Pick a vaccine from the current list. `None` clears the selection.
    pub fn select_vaccine(&mut self, vaccine_id: Option<i64>) -> Result<()> {
        match vaccine_id {
            None => {
                self.vaccine_id = None;
                Ok(())
            }
            Some(id) if self.vaccines.iter().any(|v| v.id == id) => {
                self.vaccine_id = Some(id);
                Ok(())
            }
            Some(id) => Err(FlowError::NotOffered { vaccine_id: id }),
        }
    }

    /// Prompt shown in place of an empty vaccine choice.
    pub fn placeholder(&self) -> &'static str {
        match (self.doctor_id, self.vaccines.is_empty()) {
            (None, _) => "Select Doctor First",
            (Some(_), true) => "No Vaccines assigned to this Doctor",
            (Some(_), false) => "Select Vaccine",
        }
    }
}

// =============================================================================
// Booking form
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub user_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub vaccine_id: Option<i64>,
    pub date: Option<NaiveDate>,
    /// Raw time input, `HH:MM` or `HH:MM:SS`.
    pub time: String,
}

impl BookingForm {
    /// Take doctor and vaccine from a filter.
    pub fn with_selection<D: VaccineDirectory>(mut self, filter: &VaccineFilter<D>) -> Self {
        self.doctor_id = filter.doctor_id();
        self.vaccine_id = filter.vaccine_id();
        self
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.user_id.is_none() {
            missing.push("user");
        }
        if self.doctor_id.is_none() {
            missing.push("doctor");
        }
        if self.vaccine_id.is_none() {
            missing.push("vaccine");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time.trim().is_empty() {
            missing.push("time");
        }
        missing
    }

    /// Build the booking request, normalizing the time to `HH:MM:SS`.
    pub fn to_request(&self) -> Result<AppointmentRequest> {
        let (Some(user_id), Some(doc_id), Some(vaccine_id), Some(date), false) = (
            self.user_id,
            self.doctor_id,
            self.vaccine_id,
            self.date,
            self.time.trim().is_empty(),
        ) else {
            return Err(FlowError::Incomplete {
                missing: self.missing_fields(),
            });
        };

        let time = parse_time(&self.time)?;
        Ok(AppointmentRequest {
            doc_id,
            vaccine_id,
            user_id,
            appointment_date: date,
            appointment_time: time,
        })
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    parse_time_of_day(raw).ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.insert(TIME_FIELD, INVALID_TIME);
        FlowError::Invalid(errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> BookingForm {
        BookingForm {
            user_id: Some(7),
            doctor_id: Some(2),
            vaccine_id: Some(11),
            date: NaiveDate::from_ymd_opt(2026, 3, 14),
            time: "09:30".into(),
        }
    }

    #[test]
    fn test_time_slots() {
        assert_eq!(TIME_SLOTS.len(), 12);
        assert_eq!(TIME_SLOTS[0], "09:00");
        assert_eq!(TIME_SLOTS[5], "11:30");
        assert_eq!(TIME_SLOTS[6], "14:00");
        assert_eq!(TIME_SLOTS[11], "16:30");
        assert!(TIME_SLOTS.iter().all(|s| parse_time_of_day(s).is_some()));
    }

    #[test]
    fn test_short_time_gets_seconds() {
        let request = complete().to_request().unwrap();
        assert_eq!(
            request.appointment_time,
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(request.doc_id, 2);
        assert_eq!(request.vaccine_id, 11);
        assert_eq!(request.user_id, 7);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let form = BookingForm {
            vaccine_id: None,
            time: "  ".into(),
            ..complete()
        };
        assert_eq!(
            form.to_request(),
            Err(FlowError::Incomplete {
                missing: vec!["vaccine", "time"]
            })
        );
    }

    #[test]
    fn test_bad_time_rejected() {
        let form = BookingForm {
            time: "9.30am".into(),
            ..complete()
        };
        let Err(FlowError::Invalid(errors)) = form.to_request() else {
            panic!("expected invalid time");
        };
        assert_eq!(errors.get(TIME_FIELD), Some(INVALID_TIME));
    }
}
