// Per-entity form schemas. Immutable at runtime; one static per form.

use crate::validate::rules::{CrossRule, Field, Schema};
use once_cell::sync::Lazy;
use regex::Regex;

static OTP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{6}$").expect("otp pattern is valid"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("url pattern is valid"));

/// Shared password constraints applied to every password-bearing form
fn password_field(path: &'static str) -> Field {
    Field::text(path)
        .required("Password is required")
        .min_len(8, "Password must be at least 8 characters")
        .max_len(72, "Password must be at most 72 characters")
}

pub static LOGIN: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("email")
            .required("Email is required")
            .email("Enter a valid email address"),
        Field::text("password").required("Password is required"),
    ])
});

pub static STUDENT_REGISTRATION: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("name")
            .required("Name is required")
            .min_len(2, "Name must be at least 2 characters")
            .max_len(100, "Name must be at most 100 characters"),
        Field::text("email")
            .required("Email is required")
            .email("Enter a valid email address"),
        password_field("password"),
        Field::text("confirmPassword").required("Confirm your password"),
    ])
    .with_cross(CrossRule::fields_equal(
        "password",
        "confirmPassword",
        "confirmPassword",
        "Passwords do not match",
    ))
});

pub static UNIVERSITY_REGISTRATION: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("name")
            .required("University name is required")
            .min_len(2, "University name must be at least 2 characters")
            .max_len(150, "University name must be at most 150 characters"),
        Field::text("email")
            .required("Email is required")
            .email("Enter a valid email address"),
        Field::text("location").required("Location is required"),
        Field::text("website").matches(&URL_RE, "Enter a valid website URL"),
        Field::text("description").max_len(2000, "Description must be at most 2000 characters"),
        password_field("password"),
        Field::text("confirmPassword").required("Confirm your password"),
    ])
    .with_cross(CrossRule::fields_equal(
        "password",
        "confirmPassword",
        "confirmPassword",
        "Passwords do not match",
    ))
});

/// University profile fields without the registration credentials; used
/// by the admin-side create/update pages
pub static UNIVERSITY_PROFILE: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("name")
            .required("University name is required")
            .min_len(2, "University name must be at least 2 characters")
            .max_len(150, "University name must be at most 150 characters"),
        Field::text("email")
            .required("Email is required")
            .email("Enter a valid email address"),
        Field::text("location").required("Location is required"),
        Field::text("website").matches(&URL_RE, "Enter a valid website URL"),
        Field::text("description").max_len(2000, "Description must be at most 2000 characters"),
    ])
});

pub static SCHOLARSHIP: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("title")
            .required("Title is required")
            .min_len(3, "Title must be at least 3 characters")
            .max_len(150, "Title must be at most 150 characters"),
        Field::text("description").max_len(2000, "Description must be at most 2000 characters"),
        Field::number("amount")
            .required("Amount is required")
            .numeric("Amount must be a number")
            .min(0.0, "Amount cannot be negative")
            .max(1_000_000.0, "Amount exceeds the allowed maximum"),
        Field::text("deadline").required("Deadline is required"),
    ])
});

pub static EVENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("title")
            .required("Title is required")
            .min_len(3, "Title must be at least 3 characters")
            .max_len(150, "Title must be at most 150 characters"),
        Field::text("location").required("Location is required"),
        Field::text("date").required("Date is required"),
        Field::number("capacity")
            .numeric("Capacity must be a number")
            .min(1.0, "Capacity must be at least 1")
            .max(100_000.0, "Capacity exceeds the allowed maximum"),
    ])
});

pub static OTP_REQUEST: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![Field::text("email")
        .required("Email is required")
        .email("Enter a valid email address")])
});

pub static PASSWORD_RESET: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        Field::text("email")
            .required("Email is required")
            .email("Enter a valid email address"),
        Field::text("otp")
            .required("OTP is required")
            .matches(&OTP_RE, "OTP must be 6 digits"),
        password_field("password"),
        Field::text("confirmPassword").required("Confirm your password"),
    ])
    .with_cross(CrossRule::fields_equal(
        "password",
        "confirmPassword",
        "confirmPassword",
        "Passwords do not match",
    ))
});
