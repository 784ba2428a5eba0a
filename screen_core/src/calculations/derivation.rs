//! # Derivation Stages
//!
//! The geometric quantities of the screen, computed in a fixed order with
//! the validity gates in between. The order is carried by the types: each
//! stage can only be built by consuming the one before it, so a quantity
//! cannot be read before the stage that computes it has run, and once the
//! last stage finishes every field of [`Derivation`] is populated.
//!
//! ```text
//! ScreenInput ─gate 1─► ChannelStage ─gate 2─► StandStage ─gate 3─►
//!            GrateStage ─gate 4─► Derivation
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gates;
use super::screen::ScreenInput;
use crate::catalog::{Count, SizeCode};
use crate::equations::geometry;
use crate::errors::CalcResult;
use crate::trace::TraceRecorder;

/// Fully derived geometry of a screen that passed every gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    /// Width size code of the channel
    pub channel_size_code: SizeCode,
    /// Channel size code minus screen width code (0..=2)
    pub width_code_difference: SizeCode,
    /// Channel floor to screen pivot axis (m)
    pub screen_pivot_height_m: f64,
    /// Channel rim to screen pivot axis (m)
    pub stand_height_m: f64,
    /// Height size code of the floor stand
    pub stand_size_code: SizeCode,
    /// Clear width between the side plates (m)
    pub inner_screen_width_m: f64,
    /// Width of one filter bar (m)
    pub profile_width_m: f64,
    /// Number of filter bars in the grate
    pub profile_count: Count,
    /// Height size code of the backwall table
    pub backwall_size_code: SizeCode,
    /// Height size code of the front covers
    pub cover_size_code: SizeCode,
    /// Length of one drive chain (m)
    pub chain_length_m: f64,
    /// Number of rakes on the chain
    pub rake_count: Count,
    /// Number of front covers
    pub cover_count: Count,
}

/// Raw input checked against the grate (gate 1) and the channel (gate 2).
#[derive(Debug, Clone)]
pub struct ChannelStage<'a> {
    input: &'a ScreenInput,
    channel_size_code: SizeCode,
}

impl<'a> ChannelStage<'a> {
    pub fn derive(input: &'a ScreenInput, trace: &mut TraceRecorder) -> CalcResult<Self> {
        gates::check_grate_height(input.screen_height_code, input.grate_height_code)?;

        let channel_size_code = geometry::channel_size_code(input.channel_width_m);
        trace.count("Channel width size code", channel_size_code);
        gates::check_channel_width(channel_size_code, input.screen_width_code)?;

        Ok(Self {
            input,
            channel_size_code,
        })
    }

    pub fn channel_size_code(&self) -> SizeCode {
        self.channel_size_code
    }

    /// Size the floor stand and check it against the channel depth (gate 3).
    pub fn derive_stand(self, trace: &mut TraceRecorder) -> CalcResult<StandStage<'a>> {
        let input = self.input;

        let screen_pivot_height_m = geometry::screen_pivot_height(input.screen_height_code);
        trace.distance("Height from channel floor to screen pivot", screen_pivot_height_m, 3);

        let stand_height_m = geometry::stand_height(screen_pivot_height_m, input.channel_height_m);
        trace.distance("Stand height from channel rim to screen pivot", stand_height_m, 3);

        let stand_size_code = geometry::stand_size_code(stand_height_m);
        trace.count("Stand height size code", stand_size_code);
        gates::check_stand(stand_size_code)?;

        Ok(StandStage {
            channel: self,
            screen_pivot_height_m,
            stand_height_m,
            stand_size_code,
        })
    }
}

/// Channel and stand fit; the grate is not sized yet.
#[derive(Debug, Clone)]
pub struct StandStage<'a> {
    channel: ChannelStage<'a>,
    screen_pivot_height_m: f64,
    stand_height_m: f64,
    stand_size_code: SizeCode,
}

impl<'a> StandStage<'a> {
    pub fn stand_size_code(&self) -> SizeCode {
        self.stand_size_code
    }

    /// Count the filter bars and check that the gap leaves room for two (gate 4).
    pub fn derive_grate(self, trace: &mut TraceRecorder) -> CalcResult<GrateStage<'a>> {
        let input = self.channel.input;

        let inner_screen_width_m = geometry::inner_screen_width(input.screen_width_code);
        trace.distance("Clear screen width", inner_screen_width_m, 3);

        let profile_width_m = input.filter_profile.bar_width_m();
        trace.distance("Filter bar width", profile_width_m, 4);

        let raw_count = geometry::profile_count(inner_screen_width_m, profile_width_m, input.gap_m);
        trace.count("Filter bar count", raw_count);
        let profile_count = gates::check_profile_count(raw_count)?;

        Ok(GrateStage {
            stand: self,
            inner_screen_width_m,
            profile_width_m,
            profile_count,
        })
    }
}

/// Every gate passed; only the ungated layout quantities remain.
#[derive(Debug, Clone)]
pub struct GrateStage<'a> {
    stand: StandStage<'a>,
    inner_screen_width_m: f64,
    profile_width_m: f64,
    profile_count: Count,
}

impl GrateStage<'_> {
    pub fn profile_count(&self) -> Count {
        self.profile_count
    }

    /// Derive table, covers, chain and rakes, and seal the result.
    pub fn derive_layout(self, trace: &mut TraceRecorder) -> Derivation {
        let stand = self.stand;
        let channel = stand.channel;
        let input = channel.input;

        let width_code_difference =
            geometry::width_code_difference(channel.channel_size_code, input.screen_width_code);
        trace.count("Channel/screen width code difference", width_code_difference);

        let backwall_size_code = geometry::backwall_size_code(input.screen_height_code, input.grate_height_code);
        trace.count("Table height size code", backwall_size_code);

        let cover_size_code = geometry::cover_size_code(backwall_size_code, stand.stand_size_code);
        trace.count("Front cover height size code", cover_size_code);

        let chain_length_m = geometry::chain_length(input.screen_height_code);
        trace.distance("Chain length", chain_length_m, 3);

        let rake_count = geometry::rake_count(chain_length_m);
        trace.count("Rake count", rake_count);

        let cover_count = geometry::cover_count(input.screen_width_code);
        trace.count("Front cover count", cover_count);

        Derivation {
            channel_size_code: channel.channel_size_code,
            width_code_difference,
            screen_pivot_height_m: stand.screen_pivot_height_m,
            stand_height_m: stand.stand_height_m,
            stand_size_code: stand.stand_size_code,
            inner_screen_width_m: self.inner_screen_width_m,
            profile_width_m: self.profile_width_m,
            profile_count: self.profile_count,
            backwall_size_code,
            cover_size_code,
            chain_length_m,
            rake_count,
            cover_count,
        }
    }
}

/// Run every stage in order.
pub fn derive(input: &ScreenInput, trace: &mut TraceRecorder) -> CalcResult<Derivation> {
    let channel = ChannelStage::derive(input, trace)?;
    debug!(channel_size_code = channel.channel_size_code(), "channel stage done");

    let stand = channel.derive_stand(trace)?;
    debug!(stand_size_code = stand.stand_size_code(), "stand stage done");

    let grate = stand.derive_grate(trace)?;
    debug!(profile_count = grate.profile_count(), "grate stage done");

    Ok(grate.derive_layout(trace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::screen::tests::reference_input;
    use crate::errors::CalcError;

    #[test]
    fn test_reference_derivation() {
        let mut trace = TraceRecorder::new();
        let d = derive(&reference_input(), &mut trace).unwrap();
        assert_eq!(d.channel_size_code, 10);
        assert_eq!(d.width_code_difference, 0);
        assert!((d.screen_pivot_height_m - 2.2119).abs() < 1e-9);
        assert!((d.stand_height_m - 1.2119).abs() < 1e-9);
        assert_eq!(d.stand_size_code, 13);
        assert!((d.inner_screen_width_m - 0.868).abs() < 1e-9);
        assert_eq!(d.profile_count, 49);
        assert_eq!(d.backwall_size_code, 10);
        assert_eq!(d.cover_size_code, 10);
        assert!((d.chain_length_m - 5.6).abs() < 1e-9);
        assert_eq!(d.rake_count, 7);
        assert_eq!(d.cover_count, 2);
        assert_eq!(trace.len(), 13);
    }

    #[test]
    fn test_stages_expose_only_computed_values() {
        let input = reference_input();
        let mut trace = TraceRecorder::new();
        let channel = ChannelStage::derive(&input, &mut trace).unwrap();
        assert_eq!(channel.channel_size_code(), 10);
        assert_eq!(trace.len(), 1);
        let stand = channel.derive_stand(&mut trace).unwrap();
        assert_eq!(stand.stand_size_code(), 13);
        assert_eq!(trace.len(), 4);
    }

    #[test]
    fn test_gate_one_runs_before_any_derivation() {
        let mut input = reference_input();
        input.grate_height_code = 16;
        let mut trace = TraceRecorder::new();
        let err = derive(&input, &mut trace).unwrap_err();
        assert!(matches!(err, CalcError::ScreenTooTall { .. }));
        assert!(trace.is_empty());
    }

    #[test]
    fn test_deep_channel_stops_at_stand() {
        let mut input = reference_input();
        input.channel_height_m = 1.7;
        let mut trace = TraceRecorder::new();
        let err = derive(&input, &mut trace).unwrap_err();
        assert_eq!(err, CalcError::ChannelTooDeep { stand_size_code: 4 });
        // channel code, pivot, stand height, stand code
        assert_eq!(trace.len(), 4);
    }
}
