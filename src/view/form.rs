use crate::api::{ApiError, ListingSource};
use crate::models::{ContactFormData, ContactResponse};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
    Budget,
    Location,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Budget,
        FormField::Location,
        FormField::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Message => "message",
            FormField::Budget => "budget",
            FormField::Location => "location",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no form field named '{0}'")]
    UnknownField(String),
    #[error("{0} is required")]
    Missing(FormField),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("a submission is already in progress")]
    AlreadySubmitting,
}

/// Which page the form sits on; decides the required inputs and button copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormKind {
    /// Quick enquiry on the landing page: name, phone, budget, location
    Home,
    Contact,
    #[default]
    Enquiry,
}

impl FormKind {
    pub fn required_fields(&self) -> &'static [FormField] {
        match self {
            FormKind::Home => &[FormField::Name, FormField::Phone],
            FormKind::Contact => &[
                FormField::Name,
                FormField::Email,
                FormField::Phone,
                FormField::Message,
            ],
            FormKind::Enquiry => &FormField::ALL,
        }
    }

    pub fn is_required(&self, field: FormField) -> bool {
        self.required_fields().contains(&field)
    }

    pub fn submit_label(&self, submitting: bool) -> &'static str {
        match (self, submitting) {
            (FormKind::Contact, false) => "Send",
            (FormKind::Contact, true) => "Sending...",
            (FormKind::Home | FormKind::Enquiry, false) => "Submit Enquiry",
            (FormKind::Home | FormKind::Enquiry, true) => "Submitting...",
        }
    }
}

/// Banner shown after a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitStatus {
    pub success: bool,
    pub message: String,
}

/// Controlled-input state for the contact and enquiry forms.
///
/// Lives for one page visit; cleared after a successful submission.
#[derive(Debug, Default)]
pub struct ContactForm {
    kind: FormKind,
    name: String,
    email: String,
    phone: String,
    message: String,
    budget: String,
    location: String,
    submitting: bool,
    status: Option<SubmitStatus>,
}

impl ContactForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Set a field by its input name, as a change event would.
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = name.parse()?;
        self.set(field, value);
        Ok(())
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
            FormField::Budget => &self.budget,
            FormField::Location => &self.location,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
            FormField::Budget => &mut self.budget,
            FormField::Location => &mut self.location,
        }
    }

    /// Required inputs for this kind must be non-blank; an email, once given, must look like one.
    pub fn validate(&self) -> Result<(), FormError> {
        if let Some(field) = self
            .kind
            .required_fields()
            .iter()
            .copied()
            .find(|field| self.value(*field).trim().is_empty())
        {
            return Err(FormError::Missing(field));
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err(FormError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Wire payload; a budget without leading digits is sent as 0.
    pub fn payload(&self) -> ContactFormData {
        ContactFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            budget: parse_leading_int(&self.budget),
            location: self.location.clone(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self) -> Option<&SubmitStatus> {
        self.status.as_ref()
    }

    pub fn submit_label(&self) -> &'static str {
        self.kind.submit_label(self.submitting)
    }

    /// Validate and lock the form for one submission.
    pub fn begin_submit(&mut self) -> Result<ContactFormData, FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.validate()?;
        self.submitting = true;
        self.status = None;
        Ok(self.payload())
    }

    pub fn finish(&mut self, result: Result<ContactResponse, ApiError>) -> &SubmitStatus {
        self.submitting = false;
        let status = match result {
            Ok(response) => {
                self.clear_fields();
                SubmitStatus {
                    success: true,
                    message: response.message,
                }
            }
            Err(err) => SubmitStatus {
                success: false,
                message: err.to_string(),
            },
        };
        self.status.insert(status)
    }

    pub async fn submit<S>(&mut self, source: &S) -> Result<&SubmitStatus, FormError>
    where
        S: ListingSource + ?Sized,
    {
        let payload = self.begin_submit()?;
        info!("Submitting {:?} form for {}", self.kind, payload.email);
        let result = source.submit_contact_form(&payload).await;
        if let Err(err) = &result {
            warn!("Error submitting contact form: {}", err);
        }
        Ok(self.finish(result))
    }

    fn clear_fields(&mut self) {
        for field in FormField::ALL {
            self.slot(field).clear();
        }
    }

    /// Status banner line, if any
    pub fn render_status(&self) -> Option<String> {
        self.status.as_ref().map(|status| {
            let marker = if status.success { "✔" } else { "✖" };
            format!("{marker} {}", status.message)
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Optional sign then leading digits, like a lenient integer input.
/// Digit runs too long for `i64` saturate instead of collapsing to 0.
fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let value = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });
    if negative {
        -value
    } else {
        value
    }
}
