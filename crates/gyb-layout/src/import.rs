// Render request and sponsor export loading.
//
// A render request is the JSON the campaign page would send: the layout
// config, the container size and the sponsor list. Sponsors can also come
// from the organizer dashboard's CSV export, whose rows are frequently
// hand-edited; bad rows are skipped with a warning rather than failing the
// whole import.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::sponsor::{
    ApprovalStatus, Container, DisplaySize, LayoutConfig, PaymentStatus, SponsorRecord,
    SponsorType,
};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Everything one render call needs.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutRequest {
    pub layout: LayoutConfig,
    pub container: Container,
    #[serde(default)]
    pub sponsors: Vec<SponsorRecord>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// Dashboard export row. Numeric columns are read as text so a stray
/// "$25" or "n/a" falls back to the engine default instead of dropping
/// the sponsor. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawSponsorRow {
    id: String,
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    position_id: Option<String>,
    #[serde(default)]
    sponsor_type: Option<String>,
    #[serde(default)]
    logo_url: Option<String>,
    #[serde(default)]
    logo_approval_status: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    font_size: Option<String>,
    #[serde(default)]
    logo_width: Option<String>,
    #[serde(default)]
    display_size: Option<String>,
}

// ---------------------------------------------------------------------------
// Field parsing helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(row_id: &str, column: &str, value: Option<String>) -> Option<f64> {
    let text = non_empty(value)?;
    let cleaned = text.trim_start_matches('$').replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            warn!("sponsor '{}': ignoring unparsable {} '{}'", row_id, column, text);
            None
        }
    }
}

fn parse_sponsor_type(value: &str) -> Option<SponsorType> {
    match value.to_lowercase().as_str() {
        "" | "text" => Some(SponsorType::Text),
        "logo" => Some(SponsorType::Logo),
        _ => None,
    }
}

fn parse_approval(value: &str) -> Option<ApprovalStatus> {
    match value.to_lowercase().as_str() {
        "pending" => Some(ApprovalStatus::Pending),
        "approved" => Some(ApprovalStatus::Approved),
        "rejected" => Some(ApprovalStatus::Rejected),
        _ => None,
    }
}

fn parse_payment(value: &str) -> Option<PaymentStatus> {
    match value.to_lowercase().as_str() {
        "" | "paid" => Some(PaymentStatus::Paid),
        "pending" => Some(PaymentStatus::Pending),
        "failed" => Some(PaymentStatus::Failed),
        _ => None,
    }
}

fn parse_display_size(value: &str) -> Option<DisplaySize> {
    match value.to_lowercase().as_str() {
        "small" => Some(DisplaySize::Small),
        "medium" => Some(DisplaySize::Medium),
        "large" => Some(DisplaySize::Large),
        "xlarge" => Some(DisplaySize::Xlarge),
        _ => None,
    }
}

/// Convert a raw row, or explain why it has to be skipped.
fn sponsor_from_row(raw: RawSponsorRow) -> Result<SponsorRecord, String> {
    let id = raw.id.trim().to_string();
    let name = raw.name.trim().to_string();
    if id.is_empty() || name.is_empty() {
        return Err("missing id or name".into());
    }

    let type_text = raw.sponsor_type.as_deref().unwrap_or("").trim();
    let sponsor_type = parse_sponsor_type(type_text)
        .ok_or_else(|| format!("unknown sponsor_type '{type_text}'"))?;

    let payment_text = raw.payment_status.as_deref().unwrap_or("").trim();
    let payment_status = parse_payment(payment_text)
        .ok_or_else(|| format!("unknown payment_status '{payment_text}'"))?;

    let logo_approval_status = match non_empty(raw.logo_approval_status) {
        Some(text) => Some(
            parse_approval(&text)
                .ok_or_else(|| format!("unknown logo_approval_status '{text}'"))?,
        ),
        None => None,
    };

    let display_size = non_empty(raw.display_size).and_then(|text| {
        let parsed = parse_display_size(&text);
        if parsed.is_none() {
            warn!("sponsor '{}': ignoring unknown display_size '{}'", id, text);
        }
        parsed
    });

    Ok(SponsorRecord {
        amount: parse_number(&id, "amount", raw.amount),
        calculated_font_size: parse_number(&id, "font_size", raw.font_size),
        calculated_logo_width: parse_number(&id, "logo_width", raw.logo_width),
        display_name: non_empty(raw.display_name),
        message: non_empty(raw.message),
        position_id: non_empty(raw.position_id),
        logo_url: non_empty(raw.logo_url),
        sponsor_type,
        logo_approval_status,
        payment_status,
        display_size,
        id,
        name,
    })
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

pub fn load_sponsors_from_reader<R: Read>(rdr: R) -> Result<Vec<SponsorRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut sponsors = Vec::new();
    for result in reader.deserialize::<RawSponsorRow>() {
        match result {
            Ok(raw) => {
                let label = raw.id.trim().to_string();
                match sponsor_from_row(raw) {
                    Ok(sponsor) => sponsors.push(sponsor),
                    Err(reason) => warn!("skipping sponsor row '{}': {}", label, reason),
                }
            }
            Err(e) => {
                warn!("skipping malformed sponsor row: {}", e);
            }
        }
    }
    Ok(sponsors)
}

pub fn load_request_from_reader<R: Read>(rdr: R) -> Result<LayoutRequest, serde_json::Error> {
    serde_json::from_reader(rdr)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, ImportError> {
    std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load sponsors from a dashboard CSV export.
pub fn load_sponsors_csv(path: &Path) -> Result<Vec<SponsorRecord>, ImportError> {
    let file = open(path)?;
    load_sponsors_from_reader(std::io::BufReader::new(file)).map_err(|e| ImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load a JSON render request.
pub fn load_request(path: &Path) -> Result<LayoutRequest, ImportError> {
    let file = open(path)?;
    load_request_from_reader(std::io::BufReader::new(file)).map_err(|e| ImportError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
