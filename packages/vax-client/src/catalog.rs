//! Doctors, vaccination centers and vaccines.

use tracing::debug;

use crate::types::{
    Doctor, DoctorCenterLink, NewCenter, NewDoctor, NewVaccine, VaccinationCenter, Vaccine,
};
use crate::{ApiClient, Result};

impl ApiClient {
    // =========================================================================
    // Doctors
    // =========================================================================

    /// `GET /doctor/getAll`
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.send_list(self.get("/doctor/getAll")).await
    }

    /// `POST /doctor/add`
    pub async fn add_doctor(&self, doctor: &NewDoctor) -> Result<Option<String>> {
        debug!(name = %doctor.name, "Adding doctor");
        self.send_for_message(self.post("/doctor/add").json(doctor))
            .await
    }

    /// `POST /doctor/associateWithCenter`
    pub async fn link_doctor_to_center(&self, link: DoctorCenterLink) -> Result<Option<String>> {
        debug!(doc_id = link.doc_id, center_id = link.center_id, "Linking doctor to center");
        self.send_for_message(self.post("/doctor/associateWithCenter").json(&link))
            .await
    }

    // =========================================================================
    // Centers
    // =========================================================================

    /// `GET /vaccinationCenter/getAll`
    pub async fn list_centers(&self) -> Result<Vec<VaccinationCenter>> {
        self.send_list(self.get("/vaccinationCenter/getAll")).await
    }

    /// `POST /vaccinationCenter/add`
    pub async fn add_center(&self, center: &NewCenter) -> Result<Option<String>> {
        debug!(name = %center.centre_name, "Adding vaccination center");
        self.send_for_message(self.post("/vaccinationCenter/add").json(center))
            .await
    }

    // =========================================================================
    // Vaccines
    // =========================================================================

    /// `GET /vaccine/getAll`
    pub async fn list_vaccines(&self) -> Result<Vec<Vaccine>> {
        self.send_list(self.get("/vaccine/getAll")).await
    }

    /// `GET /vaccine/get/{id}`
    pub async fn get_vaccine(&self, id: i64) -> Result<Vaccine> {
        self.send_json(self.get(&format!("/vaccine/get/{}", id)))
            .await
    }

    /// `GET /vaccine/doctor/{doctorId}`: vaccines a doctor administers.
    pub async fn vaccines_for_doctor(&self, doctor_id: i64) -> Result<Vec<Vaccine>> {
        self.send_list(self.get(&format!("/vaccine/doctor/{}", doctor_id)))
            .await
    }

    /// `POST /vaccine/add`
    pub async fn add_vaccine(&self, vaccine: &NewVaccine) -> Result<Option<String>> {
        debug!(name = %vaccine.vaccine_name, "Adding vaccine");
        self.send_for_message(self.post("/vaccine/add").json(vaccine))
            .await
    }

    /// `POST /vaccine/associate/{vaccineId}/doctor/{doctorId}`
    pub async fn link_vaccine_to_doctor(
        &self,
        vaccine_id: i64,
        doctor_id: i64,
    ) -> Result<Option<String>> {
        debug!(vaccine_id, doctor_id, "Linking vaccine to doctor");
        let path = format!("/vaccine/associate/{}/doctor/{}", vaccine_id, doctor_id);
        self.send_for_message(self.post(&path)).await
    }
}
