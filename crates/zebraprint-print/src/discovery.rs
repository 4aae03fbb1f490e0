// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoding of the JSON payload returned by native Bluetooth discovery.
//
// The native side reports a JSON array of `{ friendlyName, address }`
// records. Each record becomes a `DiscoveredPrinter` whose id is its
// position in the array; nothing is merged or deduplicated.

use tracing::debug;

use zebraprint_core::error::{Result, ZebraPrintError};
use zebraprint_core::types::{DeviceRecord, DiscoveredPrinter};

/// Decode a discovery payload into display entries, in payload order.
///
/// Anything that is not an array of device records is rejected with
/// [`ZebraPrintError::MalformedPayload`].
pub fn parse_discovery_payload(payload: &str) -> Result<Vec<DiscoveredPrinter>> {
    let records: Vec<DeviceRecord> = serde_json::from_str(payload)
        .map_err(|e| ZebraPrintError::MalformedPayload(e.to_string()))?;

    let printers: Vec<DiscoveredPrinter> = records
        .into_iter()
        .enumerate()
        .map(|(id, record)| DiscoveredPrinter {
            id,
            name: record.friendly_name,
            address: record.address,
        })
        .collect();

    debug!(count = printers.len(), "decoded discovery payload");
    Ok(printers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_printer() {
        let printers =
            parse_discovery_payload(r#"[{"friendlyName":"ZQ520","address":"00:11:22:33:44:55"}]"#)
                .unwrap();
        assert_eq!(
            printers,
            vec![DiscoveredPrinter {
                id: 0,
                name: "ZQ520".into(),
                address: "00:11:22:33:44:55".into(),
            }]
        );
    }

    #[test]
    fn ids_follow_payload_order() {
        let payload = r#"[
            {"friendlyName":"ZQ520","address":"AC:3F:A4:00:00:01"},
            {"friendlyName":"ZQ320","address":"AC:3F:A4:00:00:02"},
            {"friendlyName":"ZQ520","address":"AC:3F:A4:00:00:01"}
        ]"#;
        let printers = parse_discovery_payload(payload).unwrap();
        assert_eq!(printers.len(), 3);
        assert_eq!(printers.iter().map(|p| p.id).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(printers[1].name, "ZQ320");
        // duplicates are kept as reported
        assert_eq!(printers[0].address, printers[2].address);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_discovery_payload("[]").unwrap().is_empty());
    }

    #[test]
    fn missing_address_is_malformed() {
        let err = parse_discovery_payload(r#"[{"friendlyName":"ZQ520"}]"#).unwrap_err();
        assert!(matches!(err, ZebraPrintError::MalformedPayload(_)));
    }

    #[test]
    fn non_array_is_malformed() {
        let err = parse_discovery_payload(r#"{"friendlyName":"ZQ520","address":"x"}"#).unwrap_err();
        assert!(matches!(err, ZebraPrintError::MalformedPayload(_)));

        let err = parse_discovery_payload("Printer not found").unwrap_err();
        assert!(matches!(err, ZebraPrintError::MalformedPayload(_)));
    }
}
