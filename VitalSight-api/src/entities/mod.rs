// Public entities for the VitalSight API
// This module contains data structures that cross the application boundary

// Upload / latest-glucose response shapes
pub mod vitals;
