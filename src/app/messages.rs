//! User-facing message catalogue.

pub const FIELD_REQUIRED: &str = "This field is required";
pub const WHOLE_NUMBER_REQUIRED: &str = "Must be a whole number";

pub const GENERIC_FAILURE: &str = "An error occurred.";
pub const GENERIC_PROCESSING: &str = "Processing...";
pub const INVALID_CONFIGURATION: &str = "Configuration is invalid";

pub const MAPPING_CREATE_SUCCESS: &str = "Mapping created.";
pub const MAPPING_CREATE_FAILURE: &str = "Mapping creation failure.";
pub const MAPPING_UPDATE_SUCCESS: &str = "Mapping updated.";
pub const MAPPING_UPDATE_FAILURE: &str = "Mapping updated failure.";
pub const MAPPING_DELETE_SUCCESS: &str = "Mapping deleted.";
pub const MAPPING_DELETE_FAILURE: &str = "Mapping deletion failure.";
pub const MAPPING_TEST_SUCCESS: &str = "Mapping tested.";
pub const MAPPING_TEST_FAILURE: &str = "Mapping testing failure.";
pub const MAPPING_TEST_PARSE_FAILURE: &str = "Unable to display mapping testing result.";
pub const MAPPING_TEST_ENABLED_HINT: &str = "Only Extract and Transform can be tested.";
pub const MAPPING_TEST_DISABLED_HINT: &str = "The entity must be saved before testing.";
pub const MAPPING_TEST_RESULTS_EXTRACTED_LABEL: &str = "Extracted";
pub const MAPPING_TEST_RESULTS_TRANSFORMED_LABEL: &str = "Transformed";

pub const CONFIG_SAVE_SUCCESS: &str = "Configuration saved successfully!";
pub const CONFIG_SAVE_FAILURE: &str = "Configuration update failure!";
pub const DATABASE_DELETE_SUCCESS: &str = "Database deleted successfully!";
pub const DATABASE_DELETE_FAILURE: &str = "Database deletion failure!";
pub const DATABASE_TEST_SUCCESS: &str = "Database tested successfully";
pub const DATABASE_TEST_FAILURE: &str = "Database testing failure";

pub const DELETE_MAPPING_TITLE: &str = "Delete Mapping";
pub const DELETE_MAPPING_DESCRIPTION: &str = "Are you sure you want to delete this Mapping?";
pub const DELETE_DATABASE_TITLE: &str = "Delete Database";
pub const DELETE_DATABASE_DESCRIPTION: &str = "Are you sure you want to delete this Database?";
