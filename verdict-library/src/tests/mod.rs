//! Tests for library registration, evaluation, emission and fragments

mod test_coercion;
mod test_inline_forms;
mod test_math_domain;
