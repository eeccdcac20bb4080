//! Wire types for the vaccination backend.
//!
//! Field names follow the backend's camelCase JSON. Ids are numeric on the
//! wire; the dashboard converted every form value with `Number(...)` before
//! sending, so the typed requests here take integers directly.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth
// =============================================================================

/// Email/password pair used by both `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/verify-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailVerification {
    pub email: String,
    pub otp: u32,
}

/// Body of `PUT /auth/update-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailChange {
    pub new_email: String,
}

/// Body of `POST /auth/verify-update-otp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailChangeVerification {
    pub new_email: String,
    pub otp: u32,
}

/// Account row returned by `/auth/by-email/{email}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

// =============================================================================
// People
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn variants() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" | "M" => Ok(Gender::Male),
            "FEMALE" | "F" => Ok(Gender::Female),
            "OTHER" | "O" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub doc_id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub email_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub email_id: String,
}

/// Body of `POST /doctor/associateWithCenter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorCenterLink {
    pub doc_id: i64,
    pub center_id: i64,
}

/// User profile as returned by `/user/profile` and `/user/getAll`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Body of `POST /user/add`, completing the profile of a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: Gender,
    pub contact_no: String,
}

// =============================================================================
// Centers, vaccines, appointments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationCenter {
    #[serde(default)]
    pub center_id: Option<i64>,
    pub centre_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, with = "time_of_day::option")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day::option")]
    pub closing_time: Option<NaiveTime>,
    #[serde(default)]
    pub dose_capacity: Option<u32>,
    #[serde(default)]
    pub doctor_list: Option<Vec<serde_json::Value>>,
}

impl VaccinationCenter {
    pub fn doctor_count(&self) -> usize {
        self.doctor_list.as_ref().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCenter {
    pub centre_name: String,
    pub address: String,
    #[serde(with = "time_of_day")]
    pub opening_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub closing_time: NaiveTime,
    pub dose_capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: i64,
    pub vaccine_name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub doses_required: Option<u32>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVaccine {
    pub vaccine_name: String,
    pub manufacturer: String,
    pub doses_required: u32,
    /// Free-form range such as `"18-60"`.
    pub age_range: String,
    pub status: String,
}

/// Body of `POST /appointment/book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub doc_id: i64,
    pub vaccine_id: i64,
    pub user_id: i64,
    pub appointment_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub appointment_time: NaiveTime,
}

// =============================================================================
// Time of day
// =============================================================================

/// Parse a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// Browser time inputs produce `HH:MM`; the backend's `LocalTime` fields want
/// seconds, so everything is normalized to a full `NaiveTime`.
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .ok()
}

/// Serde adapter writing `HH:MM:SS` and reading either `HH:MM` or `HH:MM:SS`.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day: {}", raw)))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => crate::types::parse_time_of_day(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid time of day: {}", raw))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_time_of_day_accepts_short_and_full_forms() {
        let expected = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(parse_time_of_day("09:30"), Some(expected));
        assert_eq!(parse_time_of_day("09:30:00"), Some(expected));
        assert_eq!(parse_time_of_day(" 09:30 "), Some(expected));
        assert_eq!(parse_time_of_day("9.30"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
    }

    #[test]
    fn test_appointment_request_wire_format() {
        let req = AppointmentRequest {
            doc_id: 3,
            vaccine_id: 7,
            user_id: 11,
            appointment_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "docId": 3,
                "vaccineId": 7,
                "userId": 11,
                "appointmentDate": "2026-11-02",
                "appointmentTime": "14:30:00",
            })
        );
    }

    #[test]
    fn test_email_change_payloads_use_new_email_key() {
        let req = EmailChangeVerification {
            new_email: "new@example.com".into(),
            otp: 123456,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"newEmail": "new@example.com", "otp": 123456})
        );
    }

    #[test]
    fn test_center_accepts_short_times_and_missing_fields() {
        let center: VaccinationCenter = serde_json::from_value(json!({
            "centerId": 1,
            "centreName": "North Clinic",
            "openingTime": "09:00",
            "closingTime": "17:00:00",
            "doctorList": [{"docId": 1}, {"docId": 2}]
        }))
        .unwrap();

        assert_eq!(center.opening_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(center.closing_time, NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(center.doctor_count(), 2);
        assert_eq!(center.dose_capacity, None);
    }

    #[test]
    fn test_gender_parsing_and_wire_format() {
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("M".parse::<Gender>(), Ok(Gender::Male));
        assert!("robot".parse::<Gender>().is_err());
        assert_eq!(serde_json::to_value(Gender::Other).unwrap(), json!("OTHER"));
    }
}
