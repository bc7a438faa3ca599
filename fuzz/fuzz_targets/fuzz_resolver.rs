#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use sheet_core::position::{offset_for_position, position_for_coverage, position_for_offset};
use sheet_core::{CoverageConfig, Position};

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let (Ok(collapsed), Ok(expanded), Ok(height), Ok(offset)) = (
        u.arbitrary::<f64>(),
        u.arbitrary::<f64>(),
        u.arbitrary::<f64>(),
        u.arbitrary::<f64>(),
    ) else {
        return;
    };

    let Ok(config) = CoverageConfig::new(collapsed, expanded) else {
        // Rejected values must actually violate the interval.
        assert!(
            !(collapsed > 0.0 && collapsed < expanded && expanded <= 1.0),
            "valid coverage rejected: {collapsed} {expanded}"
        );
        return;
    };
    assert!(config.collapsed() > 0.0 && config.collapsed() < config.expanded());
    assert!(config.expanded() <= 1.0);

    // Anchors resolve to themselves.
    assert_eq!(position_for_coverage(config.expanded(), &config), Position::Expanded);
    assert_eq!(position_for_coverage(config.collapsed(), &config), Position::Collapsed);
    assert_eq!(position_for_coverage(0.0, &config), Position::Dismissed);

    if !height.is_finite() || height <= 0.0 || !offset.is_finite() {
        return;
    }
    // Total for any finite input.
    let _ = position_for_offset(offset, height, &config);

    let dismissed = offset_for_position(Position::Dismissed, height, &config);
    let collapsed_at = offset_for_position(Position::Collapsed, height, &config);
    let expanded_at = offset_for_position(Position::Expanded, height, &config);
    assert!(expanded_at <= collapsed_at && collapsed_at <= dismissed);
});
