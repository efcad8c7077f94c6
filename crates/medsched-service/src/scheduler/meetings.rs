use chrono::{DateTime, NaiveDate, Utc};
use medsched_calendar::filter::MeetingFilter;
use medsched_calendar::range::{DateRange, filter_in_range};
use medsched_calendar::summary::{WeekView, WeeklySummary, next_up, sort_by_date_time};
use medsched_core::error::CoreError;
use medsched_core::id::new_record_id;
use medsched_core::model::{Meeting, MeetingChanges, MeetingForm, MeetingPatch, NewMeeting};
use medsched_core::types::{MeetingStatus, StatusFilter};

use super::Scheduler;
use crate::error::ServiceResult;
use crate::validate::{validate_meeting_form, validate_meeting_patch};

impl Scheduler {
    /// Fills a blank hospital name or address from the hospital record.
    async fn resolve_hospital_details(
        &self,
        hospital_id: &str,
        name: &mut String,
        address: &mut String,
    ) {
        if !name.is_empty() && !address.is_empty() {
            return;
        }
        let Some(hospital) = self.hospitals.read().await.get_by_id(hospital_id) else {
            tracing::debug!(hospital_id, "Meeting references unknown hospital");
            return;
        };
        if name.is_empty() {
            name.clone_from(&hospital.name);
        }
        if address.is_empty() {
            *address = hospital.full_address();
        }
    }

    async fn prepare_meeting(&self, form: MeetingForm) -> ServiceResult<NewMeeting> {
        let mut new = validate_meeting_form(form, self.tz(), self.expander.max_occurrences())?;
        self.resolve_hospital_details(
            &new.hospital_id,
            &mut new.hospital_name,
            &mut new.hospital_address,
        )
        .await;
        Ok(new)
    }

    /// ## Summary
    /// Validates and stores a meeting.
    ///
    /// A form carrying a recurrence rule creates the whole series; the base
    /// meeting is returned.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the form is invalid.
    pub async fn create_meeting(&self, form: MeetingForm) -> ServiceResult<Meeting> {
        let new = self.prepare_meeting(form).await?;
        if !new.recurrence.is_single() {
            let series = self.store_series(new).await?;
            return series
                .into_iter()
                .next()
                .ok_or_else(|| {
                    CoreError::InvariantViolation("Validated recurrence produced an empty series")
                        .into()
                });
        }

        if self.is_remote("create_meeting") {
            return Ok(Meeting::from_new(new_record_id(), new, Utc::now()));
        }

        Ok(self.meetings.write().await.create(new))
    }

    /// ## Summary
    /// Validates a meeting and stores its full recurrence series.
    ///
    /// Returns every stored instance, the base first. A form without a rule
    /// yields a single-element series.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the form is invalid.
    pub async fn create_meeting_series(&self, form: MeetingForm) -> ServiceResult<Vec<Meeting>> {
        let new = self.prepare_meeting(form).await?;
        self.store_series(new).await
    }

    async fn store_series(&self, new: NewMeeting) -> ServiceResult<Vec<Meeting>> {
        let base = Meeting::from_new(new_record_id(), new, Utc::now());
        let series = self.expander.expand_meeting(&base);
        tracing::debug!(base_id = %base.id, instances = series.len(), "Expanded meeting series");

        if self.is_remote("create_meeting_series") {
            return Ok(series);
        }

        Ok(self.meetings.write().await.insert_all(series)?)
    }

    /// ## Summary
    /// Applies a validated partial update.
    ///
    /// When the hospital changes without a new name or address, both are
    /// refreshed from the hospital record. Returns `Ok(None)` if no meeting
    /// has `id`.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the patch is invalid.
    pub async fn update_meeting(
        &self,
        id: &str,
        patch: MeetingPatch,
    ) -> ServiceResult<Option<Meeting>> {
        let mut changes = validate_meeting_patch(patch, self.tz())?;
        if self.is_remote("update_meeting") {
            return Ok(None);
        }

        if let Some(hospital_id) = changes.hospital_id.clone() {
            let mut name = changes.hospital_name.take().unwrap_or_default();
            let mut address = changes.hospital_address.take().unwrap_or_default();
            self.resolve_hospital_details(&hospital_id, &mut name, &mut address)
                .await;
            changes.hospital_name = Some(name).filter(|name| !name.is_empty());
            changes.hospital_address = Some(address).filter(|address| !address.is_empty());
        }

        Ok(self.meetings.write().await.update(id, changes))
    }

    /// Sets the status of a meeting. `None` if no meeting has `id`.
    pub async fn update_meeting_status(&self, id: &str, status: MeetingStatus) -> Option<Meeting> {
        if self.is_remote("update_meeting_status") {
            return None;
        }
        self.meetings
            .write()
            .await
            .update(id, MeetingChanges::status(status))
    }

    /// Removes a single meeting. Other instances of its series are kept.
    pub async fn delete_meeting(&self, id: &str) -> bool {
        if self.is_remote("delete_meeting") {
            return false;
        }
        self.meetings.write().await.delete(id)
    }

    pub async fn get_meeting_by_id(&self, id: &str) -> Option<Meeting> {
        if self.is_remote("get_meeting_by_id") {
            return None;
        }
        self.meetings.read().await.get_by_id(id)
    }

    pub async fn get_all_meetings(&self) -> Vec<Meeting> {
        if self.is_remote("get_all_meetings") {
            return Vec::new();
        }
        self.meetings.read().await.get_all()
    }

    /// ## Summary
    /// Meetings on any day of `range`, both ends included.
    pub async fn get_meetings_in_range(&self, range: &DateRange) -> Vec<Meeting> {
        let meetings = self.get_all_meetings().await;
        filter_in_range(&meetings, range, self.tz())
    }

    /// ## Summary
    /// Meetings during the ISO week (Monday to Sunday) containing `reference`.
    ///
    /// ## Errors
    /// Returns `ServiceError::CalendarError` if the week runs past the
    /// representable calendar.
    pub async fn get_meetings_by_week(&self, reference: NaiveDate) -> ServiceResult<Vec<Meeting>> {
        let week = DateRange::iso_week(reference)?;
        Ok(self.get_meetings_in_range(&week).await)
    }

    /// ## Errors
    /// Returns `ServiceError::CalendarError` if the month runs past the
    /// representable calendar.
    pub async fn get_meetings_by_month(&self, reference: NaiveDate) -> ServiceResult<Vec<Meeting>> {
        let month = DateRange::month(reference)?;
        Ok(self.get_meetings_in_range(&month).await)
    }

    pub async fn filter_meetings(&self, filter: &MeetingFilter) -> Vec<Meeting> {
        filter.apply(&self.get_all_meetings().await)
    }

    pub async fn get_meetings_by_hospital(&self, hospital_id: &str) -> Vec<Meeting> {
        self.filter_meetings(&MeetingFilter {
            hospital_id: Some(hospital_id.to_string()),
            ..MeetingFilter::default()
        })
        .await
    }

    /// Meetings whose doctor name contains `doctor`, ignoring case.
    pub async fn get_meetings_by_doctor(&self, doctor: &str) -> Vec<Meeting> {
        self.filter_meetings(&MeetingFilter {
            doctor: Some(doctor.to_string()),
            ..MeetingFilter::default()
        })
        .await
    }

    pub async fn get_meetings_by_status(&self, status: MeetingStatus) -> Vec<Meeting> {
        self.filter_meetings(&MeetingFilter {
            status: StatusFilter::Only(status),
            ..MeetingFilter::default()
        })
        .await
    }

    pub async fn search_meetings(&self, query: &str) -> Vec<Meeting> {
        self.filter_meetings(&MeetingFilter::search(query)).await
    }

    /// ## Summary
    /// The base meeting `base_id` and every stored instance generated from it,
    /// ordered by start time. Empty if nothing matches.
    pub async fn get_series(&self, base_id: &str) -> Vec<Meeting> {
        if self.is_remote("get_series") {
            return Vec::new();
        }
        let mut series = self.meetings.read().await.filter(|meeting| {
            meeting.id == base_id || meeting.parent_id.as_deref() == Some(base_id)
        });
        sort_by_date_time(&mut series);
        series
    }

    /// Status counts for the ISO week containing `reference`.
    ///
    /// ## Errors
    /// Returns `ServiceError::CalendarError` if the week runs past the
    /// representable calendar.
    pub async fn weekly_summary(&self, reference: NaiveDate) -> ServiceResult<WeeklySummary> {
        let meetings = self.get_meetings_by_week(reference).await?;
        Ok(WeeklySummary::from_meetings(&meetings))
    }

    /// ## Summary
    /// Day-by-day schedule of the ISO week containing `reference`, with its
    /// status counts and the starts of the neighbouring weeks.
    ///
    /// ## Errors
    /// Returns `ServiceError::CalendarError` if the week runs past the
    /// representable calendar.
    pub async fn week_view(&self, reference: NaiveDate) -> ServiceResult<WeekView> {
        let meetings = self.get_all_meetings().await;
        Ok(WeekView::build(&meetings, reference, self.tz())?)
    }

    /// The earliest scheduled meeting after `now`.
    pub async fn next_meeting(&self, now: DateTime<Utc>) -> Option<Meeting> {
        next_up(&self.get_all_meetings().await, now)
    }

    /// ## Summary
    /// Restores the meeting store to its startup state: regenerated demo
    /// meetings when seeding is enabled, otherwise empty.
    pub async fn reset_meetings(&self) {
        if self.is_remote("reset_meetings") {
            return;
        }
        let hospitals = self.hospitals.read().await.get_all();
        let meetings = self.seed.demo_meetings(&hospitals, self.tz());
        self.meetings.write().await.replace_all(meetings);
    }
}
