use chrono::Utc;
use medsched_calendar::filter::HospitalFilter;
use medsched_core::id::new_record_id;
use medsched_core::model::{Hospital, HospitalForm, HospitalPatch};

use super::Scheduler;
use crate::error::ServiceResult;
use crate::validate::{validate_hospital_form, validate_hospital_patch};

impl Scheduler {
    /// ## Summary
    /// Validates and stores a hospital.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the form is invalid.
    pub async fn create_hospital(&self, form: HospitalForm) -> ServiceResult<Hospital> {
        let form = validate_hospital_form(form)?;
        if self.is_remote("create_hospital") {
            return Ok(Hospital::from_form(new_record_id(), form, Utc::now()));
        }
        Ok(self.hospitals.write().await.create(form))
    }

    /// ## Summary
    /// Applies a validated partial update. Meetings keep the hospital details
    /// they were created with.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the patch is invalid.
    pub async fn update_hospital(
        &self,
        id: &str,
        patch: HospitalPatch,
    ) -> ServiceResult<Option<Hospital>> {
        let patch = validate_hospital_patch(patch)?;
        if self.is_remote("update_hospital") {
            return Ok(None);
        }
        Ok(self.hospitals.write().await.update(id, patch))
    }

    /// Removes a hospital. Meetings referencing it are left in place.
    pub async fn delete_hospital(&self, id: &str) -> bool {
        if self.is_remote("delete_hospital") {
            return false;
        }
        self.hospitals.write().await.delete(id)
    }

    pub async fn get_hospital_by_id(&self, id: &str) -> Option<Hospital> {
        if self.is_remote("get_hospital_by_id") {
            return None;
        }
        self.hospitals.read().await.get_by_id(id)
    }

    pub async fn get_all_hospitals(&self) -> Vec<Hospital> {
        if self.is_remote("get_all_hospitals") {
            return Vec::new();
        }
        self.hospitals.read().await.get_all()
    }

    pub async fn filter_hospitals(&self, filter: &HospitalFilter) -> Vec<Hospital> {
        filter.apply(&self.get_all_hospitals().await)
    }

    /// Hospitals whose name, address or city contains `query`, ignoring case.
    pub async fn search_hospitals(&self, query: &str) -> Vec<Hospital> {
        self.filter_hospitals(&HospitalFilter {
            query: Some(query.to_string()),
            ..HospitalFilter::default()
        })
        .await
    }

    pub async fn get_hospitals_by_city(&self, city: &str) -> Vec<Hospital> {
        self.filter_hospitals(&HospitalFilter {
            city: Some(city.to_string()),
            ..HospitalFilter::default()
        })
        .await
    }

    /// Restores the demo hospitals, or empties the store when seeding is off.
    pub async fn reset_hospitals(&self) {
        if self.is_remote("reset_hospitals") {
            return;
        }
        let hospitals = self.seed.demo_hospitals();
        self.hospitals.write().await.replace_all(hospitals);
    }
}
