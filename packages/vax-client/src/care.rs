//! Users, doses and appointments.

use tracing::debug;

use crate::types::{AppointmentRequest, NewUser, UserProfile};
use crate::{ApiClient, Result};

impl ApiClient {
    /// `GET /user/profile` for the logged-in account.
    pub async fn my_profile(&self) -> Result<UserProfile> {
        self.send_json(self.get("/user/profile")).await
    }

    /// `GET /user/getAll`
    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        self.send_list(self.get("/user/getAll")).await
    }

    /// `GET /user/getVaccinationDate?userId=`. `None` when the body is empty.
    pub async fn vaccination_date(&self, user_id: i64) -> Result<Option<String>> {
        self.send_for_message(
            self.get("/user/getVaccinationDate")
                .query(&[("userId", user_id)]),
        )
        .await
    }

    /// `POST /user/add`
    pub async fn add_user(&self, user: &NewUser) -> Result<Option<String>> {
        debug!(email = %user.email, "Completing user profile");
        self.send_for_message(self.post("/user/add").json(user))
            .await
    }

    /// `POST /dose/giveDose1?doseId=&userId=`
    pub async fn give_dose(&self, dose_id: &str, user_id: i64) -> Result<Option<String>> {
        debug!(dose_id, user_id, "Recording administered dose");
        let user_id = user_id.to_string();
        self.send_for_message(
            self.post("/dose/giveDose1")
                .query(&[("doseId", dose_id), ("userId", user_id.as_str())]),
        )
        .await
    }

    /// `POST /appointment/book`
    pub async fn book_appointment(&self, request: &AppointmentRequest) -> Result<Option<String>> {
        debug!(
            doc_id = request.doc_id,
            vaccine_id = request.vaccine_id,
            user_id = request.user_id,
            "Booking appointment"
        );
        self.send_for_message(self.post("/appointment/book").json(request))
            .await
    }
}
