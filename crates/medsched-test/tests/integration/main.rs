mod health;
mod helpers;
mod hospitals;
mod meetings;
mod recurrence;
