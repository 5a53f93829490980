// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QR challenge rendering for the add-session flow.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qrcode::render::svg;
use qrcode::QrCode;

use covey_core::CoveyError;

/// Render a pairing challenge as a `data:image/svg+xml;base64,...` URL
/// suitable for direct embedding in an `<img>` tag.
pub fn qr_data_url(challenge: &str) -> Result<String, CoveyError> {
    let code = QrCode::new(challenge.as_bytes())
        .map_err(|e| CoveyError::Internal(format!("failed to encode QR challenge: {e}")))?;
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(256, 256)
        .build();
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_embeddable_svg_data_url() {
        let url = qr_data_url("1@challenge-payload,key,token").unwrap();
        let payload = url
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data URL prefix");
        let svg_bytes = STANDARD.decode(payload).unwrap();
        let svg_text = String::from_utf8(svg_bytes).unwrap();
        assert!(svg_text.contains("<svg"));
    }

    #[test]
    fn distinct_challenges_render_distinct_images() {
        let a = qr_data_url("challenge-a").unwrap();
        let b = qr_data_url("challenge-b").unwrap();
        assert_ne!(a, b);
    }
}
