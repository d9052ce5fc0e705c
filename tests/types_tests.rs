//! Types Module Tests
//!
//! Tests for domain types (Frequency, Band, Volume, etc.)
//! Run with: cargo test --test types_tests

use si4703_firmware::types::{
    Band, ChannelSpacing, DeEmphasis, Frequency, Rssi, SeekDirection, SeekOutcome, Volume,
};

// =============================================================================
// Frequency Tests
// =============================================================================

#[test]
fn test_frequency_units() {
    let freq = Frequency::from_tenths_mhz(1019);
    assert_eq!(freq.as_tenths_mhz(), 1019);
    assert_eq!(freq.as_khz(), 101_900);
    assert!((freq.as_mhz_f32() - 101.9).abs() < 0.001);
}

#[test]
fn test_frequency_display() {
    assert_eq!(Frequency::from_tenths_mhz(1019).to_string(), "101.9 MHz");
    assert_eq!(Frequency::from_tenths_mhz(875).to_string(), "87.5 MHz");
    assert_eq!(
        format!("{:?}", Frequency::from_tenths_mhz(760)),
        "Frequency(76.0 MHz)"
    );
}

#[test]
fn test_frequency_ordering() {
    assert!(Frequency::from_tenths_mhz(875) < Frequency::from_tenths_mhz(1080));
}

// =============================================================================
// Band Tests
// =============================================================================

#[test]
fn test_band_limits() {
    assert_eq!(Band::UsEurope.bottom().as_tenths_mhz(), 875);
    assert_eq!(Band::UsEurope.top().as_tenths_mhz(), 1080);
    assert_eq!(Band::JapanWide.bottom().as_tenths_mhz(), 760);
    assert_eq!(Band::JapanWide.top().as_tenths_mhz(), 1080);
    assert_eq!(Band::Japan.bottom().as_tenths_mhz(), 760);
    assert_eq!(Band::Japan.top().as_tenths_mhz(), 900);
}

#[test]
fn test_band_contains() {
    let band = Band::UsEurope;
    assert!(band.contains(Frequency::from_tenths_mhz(875)));
    assert!(band.contains(Frequency::from_tenths_mhz(1080)));
    assert!(!band.contains(Frequency::from_tenths_mhz(874)));
    assert!(!band.contains(Frequency::from_tenths_mhz(1081)));
    assert!(!Band::Japan.contains(Frequency::from_tenths_mhz(1019)));
}

#[test]
fn test_band_field_values() {
    assert_eq!(Band::UsEurope.field_value(), 0b00);
    assert_eq!(Band::JapanWide.field_value(), 0b01);
    assert_eq!(Band::Japan.field_value(), 0b10);
}

#[test]
fn test_band_channel_math() {
    let band = Band::UsEurope;
    let spacing = ChannelSpacing::Khz200;
    assert_eq!(band.channel(Frequency::from_tenths_mhz(1019), spacing), 72);
    assert_eq!(band.channel(Frequency::from_tenths_mhz(875), spacing), 0);
    assert_eq!(band.frequency(72, spacing).as_tenths_mhz(), 1019);

    // 100 kHz grid
    let spacing = ChannelSpacing::Khz100;
    assert_eq!(band.channel(Frequency::from_tenths_mhz(1019), spacing), 144);
    assert_eq!(band.frequency(144, spacing).as_tenths_mhz(), 1019);
}

#[test]
fn test_band_channel_rounds_down() {
    let spacing = ChannelSpacing::Khz200;
    assert_eq!(Band::UsEurope.channel(Frequency::from_tenths_mhz(1020), spacing), 72);
}

#[test]
fn test_band_regional_defaults() {
    assert_eq!(Band::UsEurope.default_spacing(), ChannelSpacing::Khz200);
    assert_eq!(Band::UsEurope.default_de_emphasis(), DeEmphasis::Us75);
    assert_eq!(Band::Japan.default_spacing(), ChannelSpacing::Khz100);
    assert_eq!(Band::Japan.default_de_emphasis(), DeEmphasis::Us50);
}

// =============================================================================
// Spacing / De-emphasis Tests
// =============================================================================

#[test]
fn test_spacing_encoding() {
    assert_eq!(ChannelSpacing::Khz200.step_tenths(), 2);
    assert_eq!(ChannelSpacing::Khz100.step_tenths(), 1);
    assert_eq!(ChannelSpacing::Khz200.field_value(), 0b00);
    assert_eq!(ChannelSpacing::Khz100.field_value(), 0b01);
}

#[test]
fn test_de_emphasis_bit() {
    assert!(!DeEmphasis::Us75.bit());
    assert!(DeEmphasis::Us50.bit());
}

// =============================================================================
// Volume Tests
// =============================================================================

#[test]
fn test_volume_range() {
    assert_eq!(Volume::new(0), Some(Volume::MIN));
    assert_eq!(Volume::new(15), Some(Volume::MAX));
    assert!(Volume::new(16).is_none());
    assert_eq!(Volume::default().level(), 7);
}

#[test]
fn test_volume_from_bits_masks() {
    assert_eq!(Volume::from_bits(0x00FA).level(), 0x0A);
}

#[test]
fn test_volume_steps() {
    assert_eq!(Volume::MAX.step_up(), Volume::MAX);
    assert_eq!(Volume::MIN.step_down(), Volume::MIN);
    assert_eq!(Volume::DEFAULT.step_up().level(), 8);
    assert_eq!(Volume::DEFAULT.step_down().level(), 6);
}

#[test]
fn test_volume_try_from() {
    assert!(Volume::try_from(-1).is_err());
    assert!(Volume::try_from(i32::MAX).is_err());
    assert_eq!(Volume::try_from(0).ok(), Some(Volume::MIN));
}

// =============================================================================
// Seek / RSSI Tests
// =============================================================================

#[test]
fn test_seek_direction_bit() {
    assert!(SeekDirection::Up.bit());
    assert!(!SeekDirection::Down.bit());
}

#[test]
fn test_seek_outcome_frequency() {
    let freq = Frequency::from_tenths_mhz(975);
    assert_eq!(SeekOutcome::Found(freq).frequency(), Some(freq));
    assert_eq!(SeekOutcome::BandLimit.frequency(), None);
}

#[test]
fn test_rssi_percent() {
    assert!((Rssi::from_raw(255).percent() - 100.0).abs() < f32::EPSILON);
    assert!(Rssi::from_raw(0).percent().abs() < f32::EPSILON);
    assert!((Rssi::from_raw(51).percent() - 20.0).abs() < 0.001);
}
