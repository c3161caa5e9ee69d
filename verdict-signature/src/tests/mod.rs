//! Tests for signature validation and overload resolution

mod test_property_based;
