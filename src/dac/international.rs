//! International application-specific messages (DAC 1), after IMO
//! SN.1/Circ.236 and SN.1/Circ.289.

use alloc::string::String;

use either::Either::{self, Left, Right};
use serde::Serialize;
use tinyvec::ArrayVec;

use super::area::AreaNotice;
use crate::{BitReader, FromBits, FromFid, Position, RangeError};

/// Layouts registered under DAC 1, selected by functional ID.
#[derive(Debug, Clone, PartialEq, Serialize, FromFid)]
#[serde(tag = "description")]
pub enum International {
    #[fid(11)]
    #[serde(rename = "Met/Hydro (IMO 236, deprecated)")]
    MetHydro236(MetHydro236),
    #[fid(13)]
    #[serde(rename = "Fairway Closed")]
    FairwayClosed(FairwayClosed),
    #[fid(15)]
    #[serde(rename = "Extended Ship Static (Air Draught)")]
    AirDraught(AirDraught),
    #[fid(16)]
    #[serde(rename = "Number of Persons on Board")]
    PersonsOnBoard(PersonsOnBoard),
    #[fid(17)]
    #[serde(rename = "VTS Generated Targets")]
    VtsTargets(VtsTargets),
    #[fid(19)]
    #[serde(rename = "Marine Traffic Signal")]
    TrafficSignal(TrafficSignal),
    #[fid(21)]
    #[serde(rename = "Weather Observation")]
    WeatherObservation(WeatherObservation),
    #[fid(22)]
    #[serde(rename = "Area Notice")]
    AreaNotice(AreaNotice),
    #[fid(24)]
    #[serde(rename = "Extended Ship Static and Voyage")]
    ShipStaticVoyage(ShipStaticVoyage),
    #[fid(27)]
    #[serde(rename = "Route Information")]
    RouteInformation(RouteInformation),
    #[fid(29)]
    #[serde(rename = "Text Description")]
    TextDescription(TextDescription),
    #[fid(31)]
    #[serde(rename = "Met/Hydro (IMO 289)")]
    MetHydro289(MetHydro289),
}

/// Meteorological and hydrological data (IMO 236, superseded by FID 31).
///
/// Latitude precedes longitude in this layout.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct MetHydro236 {
    #[bits(0, 24, |v: i32| f64::from(v) / 60000.0)]
    pub latitude: f64,
    #[bits(24, 25, |v: i32| f64::from(v) / 60000.0)]
    pub longitude: f64,
    #[bits(49, 5)]
    pub day: u8,
    #[bits(54, 5)]
    pub hour: u8,
    #[bits(59, 6)]
    pub minute: u8,
    #[bits(65, 7)]
    pub wind_ave_kts: u8,
    #[bits(72, 7)]
    pub wind_gust_kts: u8,
    #[bits(79, 9)]
    pub wind_dir: u16,
    #[bits(88, 9)]
    pub wind_gust_dir: u16,
    #[bits(97, 11, |v: u32| f64::from(v) / 10.0 - 60.0)]
    pub air_temp_c: f64,
    #[bits(108, 7)]
    pub rel_humidity_pct: u8,
    #[bits(115, 10, |v: u32| f64::from(v) / 10.0 - 20.0)]
    pub dew_point_c: f64,
    #[bits(125, 9, |v: u32| v + 800)]
    pub air_pressure_hpa: u32,
    #[bits(134, 2)]
    pub air_pressure_trend: u8,
    #[bits(136, 8, |v: u32| f64::from(v) / 10.0)]
    pub horz_visibility_nm: f64,
    #[bits(144, 9, |v: u32| f64::from(v) / 10.0 - 10.0)]
    pub water_level_m: f64,
    #[bits(153, 2)]
    pub water_level_trend: u8,
    #[bits(155, 8, |v: u32| f64::from(v) / 10.0)]
    pub surf_cur_speed_kts: f64,
    #[bits(163, 9)]
    pub surf_cur_dir: u16,
    #[bits(172, 8, |v: u32| f64::from(v) / 10.0)]
    pub cur_speed_2_kts: f64,
    #[bits(180, 9)]
    pub cur_dir_2: u16,
    #[bits(189, 5)]
    pub cur_depth_2_m: u8,
    #[bits(194, 8, |v: u32| f64::from(v) / 10.0)]
    pub cur_speed_3_kts: f64,
    #[bits(202, 9)]
    pub cur_dir_3: u16,
    #[bits(211, 5)]
    pub cur_depth_3_m: u8,
    #[bits(216, 8, |v: u32| f64::from(v) / 10.0)]
    pub wave_height_m: f64,
    #[bits(224, 6)]
    pub wave_period_s: u8,
    #[bits(230, 9)]
    pub wave_dir: u16,
    #[bits(239, 8, |v: u32| f64::from(v) / 10.0)]
    pub swell_height_m: f64,
    #[bits(247, 6)]
    pub swell_period_s: u8,
    #[bits(253, 9)]
    pub swell_dir: u16,
    #[bits(262, 4)]
    pub sea_state_beaufort: u8,
    #[bits(266, 10, |v: u32| f64::from(v) / 10.0 - 10.0)]
    pub water_temp_c: f64,
    #[bits(276, 3)]
    pub precip_type: u8,
    #[bits(279, 9, |v: u32| f64::from(v) / 10.0)]
    pub salinity_ppt: f64,
    #[bits(288, 2)]
    pub ice: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct FairwayClosed {
    #[bits(0, 120)]
    pub reason: String,
    #[bits(120, 120)]
    pub location_from: String,
    #[bits(240, 120)]
    pub location_to: String,
    #[bits(360, 10)]
    pub radius: u16,
    /// 0 kilometres, 1 nautical miles, 2 metres.
    #[bits(370, 2)]
    pub units: u8,
    #[bits(372, 5)]
    pub day_from: u8,
    #[bits(377, 4)]
    pub month_from: u8,
    #[bits(381, 5)]
    pub hour_from: u8,
    #[bits(386, 6)]
    pub minute_from: u8,
    #[bits(392, 5)]
    pub day_to: u8,
    #[bits(397, 4)]
    pub month_to: u8,
    #[bits(401, 5)]
    pub hour_to: u8,
    #[bits(406, 6)]
    pub minute_to: u8,
}

/// Height of the vessel's highest point above the waterline.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct AirDraught {
    #[bits(0, 11, |v: u32| f64::from(v) / 10.0)]
    pub air_draught_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct PersonsOnBoard {
    #[bits(0, 13)]
    pub persons: u16,
}

/// Targets tracked by a VTS station that are not transmitting themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VtsTargets {
    pub targets: ArrayVec<[VtsTarget; 4]>,
}

/// Latitude precedes longitude in this layout.
#[derive(Debug, Default, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 120)]
pub struct VtsTarget {
    #[bits(0, 2)]
    #[serde(rename = "type")]
    pub target_type: u8,
    #[bits(2, 42)]
    pub id: String,
    #[bits(48, 24, |v: i32| f64::from(v) / 60000.0)]
    pub latitude: f64,
    #[bits(72, 25, |v: i32| f64::from(v) / 60000.0)]
    pub longitude: f64,
    #[bits(97, 9)]
    pub cog: u16,
    #[bits(106, 6)]
    pub timestamp: u8,
    #[bits(112, 8)]
    pub sog_kts: u8,
}

impl FromBits for VtsTargets {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let mut targets = ArrayVec::new();

        for start in bits.strides(offset, VtsTarget::WIDTH).take(4) {
            targets.push(VtsTarget::from_bits(bits, start)?);
        }

        Ok(VtsTargets { targets })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct TrafficSignal {
    #[bits(0, 10)]
    pub link_id: u16,
    #[bits(10, 120)]
    pub name: String,
    #[position(130)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(179, 2)]
    pub status: u8,
    #[bits(181, 5)]
    pub signal: u8,
    #[bits(186, 5)]
    pub utc_hour_next: u8,
    #[bits(191, 6)]
    pub utc_min_next: u8,
    #[bits(197, 5)]
    pub next_signal: u8,
}

/// Weather observation from a ship, in either the AIS-native or the
/// WMO-coded form as selected by the leading bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeatherObservation(
    #[serde(with = "either::serde_untagged")] pub Either<AisWeather, WmoWeather>,
);

impl FromBits for WeatherObservation {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let observation = if bits.get_bool(offset)? {
            Right(WmoWeather::from_bits(bits, offset)?)
        } else {
            Left(AisWeather::from_bits(bits, offset)?)
        };

        Ok(WeatherObservation(observation))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct AisWeather {
    #[bits(0, 1)]
    #[serde(rename = "type")]
    pub observation_type: u8,
    #[bits(1, 120)]
    pub location: String,
    #[position(121)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(170, 5)]
    pub day: u8,
    #[bits(175, 5)]
    pub hour: u8,
    #[bits(180, 6)]
    pub minute: u8,
    #[bits(186, 4)]
    pub wx_code: u8,
    #[bits(190, 8, |v: u32| f64::from(v) / 10.0)]
    pub horz_visibility_nm: f64,
    #[bits(198, 7)]
    pub humidity_pct: u8,
    #[bits(205, 7)]
    pub wind_speed_kts: u8,
    #[bits(212, 9)]
    pub wind_dir: u16,
    #[bits(221, 9, |v: u32| v + 800)]
    pub air_pressure_hpa: u32,
    #[bits(230, 4)]
    pub air_pressure_trend: u8,
    #[bits(234, 11, |v: i32| f64::from(v) / 10.0)]
    pub air_temp_c: f64,
    #[bits(245, 10, |v: u32| f64::from(v) / 10.0 - 10.0)]
    pub water_temp_c: f64,
    #[bits(255, 6)]
    pub wave_period_s: u8,
    #[bits(261, 8, |v: u32| f64::from(v) / 10.0)]
    pub wave_height_m: f64,
    #[bits(269, 9)]
    pub wave_dir: u16,
    #[bits(278, 8, |v: u32| f64::from(v) / 10.0)]
    pub swell_height_m: f64,
    #[bits(286, 9)]
    pub swell_dir: u16,
    #[bits(295, 6)]
    pub swell_period_s: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct WmoWeather {
    #[bits(0, 1)]
    #[serde(rename = "type")]
    pub observation_type: u8,
    #[bits(1, 16, |v: u32| f64::from(v) / 100.0 - 180.0)]
    pub longitude: f64,
    #[bits(17, 15, |v: u32| f64::from(v) / 100.0 - 90.0)]
    pub latitude: f64,
    #[bits(32, 4)]
    pub month: u8,
    #[bits(36, 6)]
    pub day: u8,
    #[bits(42, 5)]
    pub hour: u8,
    #[bits(47, 3, |v: u32| v * 10)]
    pub minute: u32,
    #[bits(50, 7, |v: u32| v * 5)]
    pub cog: u32,
    #[bits(57, 5, |v: u32| f64::from(v) * 0.5)]
    pub sog_kts: f64,
    #[bits(62, 7, |v: u32| v * 5)]
    pub heading: u32,
    #[bits(69, 11, |v: u32| f64::from(v) / 10.0 + 900.0)]
    pub pressure_hpa: f64,
    #[bits(80, 10, |v: u32| f64::from(v) / 10.0 - 50.0)]
    pub rel_pressure_hpa: f64,
    #[bits(90, 4)]
    pub pressure_trend: u8,
    #[bits(94, 7, |v: u32| v * 5)]
    pub wind_dir: u32,
    #[bits(101, 8, |v: u32| f64::from(v) * 0.5)]
    pub wind_speed_ms: f64,
    #[bits(109, 7, |v: u32| v * 5)]
    pub wind_dir_rel: u32,
    #[bits(116, 8, |v: u32| f64::from(v) * 0.5)]
    pub wind_speed_rel_ms: f64,
    #[bits(124, 8, |v: u32| f64::from(v) * 0.5)]
    pub wind_gust_speed_ms: f64,
    #[bits(132, 7, |v: u32| v * 5)]
    pub wind_gust_dir: u32,
    /// Tenths of a kelvin above 223.
    #[bits(139, 10)]
    pub air_temp_raw: u16,
    #[bits(149, 7)]
    pub humidity_pct: u8,
    #[bits(156, 9)]
    pub water_temp_raw: u16,
    #[bits(171, 9)]
    pub wx_current: u16,
    #[bits(180, 5)]
    pub wx_past_1: u8,
    #[bits(185, 5)]
    pub wx_past_2: u8,
    #[bits(190, 4, |v: u32| v * 10)]
    pub cloud_total_pct: u32,
    #[bits(194, 4)]
    pub cloud_low: u8,
    #[bits(198, 6)]
    pub cloud_low_type: u8,
    #[bits(204, 6)]
    pub cloud_middle_type: u8,
    #[bits(210, 6)]
    pub cloud_high_type: u8,
    #[bits(223, 5)]
    pub wave_period_s: u8,
    #[bits(228, 6, |v: u32| f64::from(v) * 0.5)]
    pub wave_height_m: f64,
    #[bits(234, 6, |v: u32| v * 10)]
    pub swell_dir: u32,
    #[bits(240, 5)]
    pub swell_period_s: u8,
    #[bits(245, 6, |v: u32| f64::from(v) * 0.5)]
    pub swell_height_m: f64,
    #[bits(268, 7, |v: u32| f64::from(v) / 100.0)]
    pub ice_thickness_m: f64,
    #[bits(275, 3)]
    pub ice_accretion: u8,
    #[bits(278, 3)]
    pub ice_accretion_cause: u8,
}

/// Extended static and voyage data.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct ShipStaticVoyage {
    #[bits(0, 10)]
    pub link_id: u16,
    #[bits(10, 13, |v: u32| f64::from(v) / 10.0)]
    pub air_draught_m: f64,
    #[bits(23, 30)]
    pub last_port: String,
    #[bits(53, 30)]
    pub next_port_1: String,
    #[bits(83, 30)]
    pub next_port_2: String,
    #[bits(113)]
    pub solas_status: SolasStatus,
    #[bits(165, 4)]
    pub ice_class: u8,
    #[bits(169, 18)]
    pub shaft_power_hp: u32,
    #[bits(187, 12)]
    pub vhf_channel: u16,
    #[bits(199, 42)]
    pub lloyds_ship_type: String,
    #[bits(241, 18)]
    pub gross_tonnage: u32,
    #[bits(259)]
    #[serde(flatten)]
    pub load: LoadCondition,
    #[bits(267, 14)]
    pub bunker_oil_tonnes: u16,
    #[bits(281, 13)]
    pub persons: u16,
}

/// Status of the 26 SOLAS equipment items, two bits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SolasStatus(pub [u8; 26]);

impl FromBits for SolasStatus {
    const WIDTH: usize = 52;

    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let mut status = [0; 26];

        for (i, item) in status.iter_mut().enumerate() {
            *item = bits.get_uint(offset + i * 2, 2)? as u8;
        }

        Ok(SolasStatus(status))
    }
}

/// Laden or ballast condition and fuel on board, packed into one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromBits)]
#[bits(width = 8)]
pub struct LoadCondition {
    #[bits(0, 2)]
    pub laden_ballast: u8,
    #[bits(2, 2)]
    pub heavy_oil: u8,
    #[bits(4, 2)]
    pub light_oil: u8,
    #[bits(6, 2)]
    pub diesel: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 61)]
pub struct RouteHeader {
    #[bits(0, 10)]
    pub link_id: u16,
    #[bits(10, 3)]
    pub sender_type: u8,
    #[bits(13, 5)]
    pub route_type: u8,
    #[bits(18, 4)]
    pub month: u8,
    #[bits(22, 5)]
    pub day: u8,
    #[bits(27, 5)]
    pub hour: u8,
    #[bits(32, 6)]
    pub minute: u8,
    #[bits(38, 18)]
    pub duration_min: u32,
    /// Count announced by the sender; the waypoints list holds those present.
    #[bits(56, 5)]
    pub waypoint_count: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, FromBits)]
#[bits(width = 55)]
pub struct Waypoint {
    #[position(0, extended)]
    #[serde(flatten)]
    pub position: Position,
}

/// A recommended or mandatory route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInformation {
    #[serde(flatten)]
    pub header: RouteHeader,
    pub waypoints: ArrayVec<[Waypoint; 16]>,
}

impl FromBits for RouteInformation {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let header = RouteHeader::from_bits(bits, offset)?;

        let mut waypoints = ArrayVec::new();
        for start in bits
            .strides(offset + RouteHeader::WIDTH, Waypoint::WIDTH)
            .take(16)
        {
            waypoints.push(Waypoint::from_bits(bits, start)?);
        }

        Ok(RouteInformation { header, waypoints })
    }
}

/// Free text associated with a link ID, filling the rest of the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDescription {
    pub link_id: u16,
    pub text: String,
}

impl FromBits for TextDescription {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let link_id = bits.get_uint(offset, 10)? as u16;

        let remaining = bits.len_bits().saturating_sub(offset + 10);
        let text = bits.get_string(offset + 10, remaining - remaining % 6)?;

        Ok(TextDescription { link_id, text })
    }
}

/// Meteorological and hydrological data (IMO 289).
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct MetHydro289 {
    #[position(0)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(49, 1)]
    pub position_accuracy: bool,
    #[bits(50, 5)]
    pub day: u8,
    #[bits(55, 5)]
    pub hour: u8,
    #[bits(60, 6)]
    pub minute: u8,
    #[bits(66, 7)]
    pub wind_ave_kts: u8,
    #[bits(73, 7)]
    pub wind_gust_kts: u8,
    #[bits(80, 9)]
    pub wind_dir: u16,
    #[bits(89, 9)]
    pub wind_gust_dir: u16,
    #[bits(98, 11, |v: i32| f64::from(v) / 10.0)]
    pub air_temp_c: f64,
    #[bits(109, 7)]
    pub rel_humidity_pct: u8,
    #[bits(116, 10, |v: i32| f64::from(v) / 10.0)]
    pub dew_point_c: f64,
    #[bits(126, 9, |v: u32| v + 800)]
    pub air_pressure_hpa: u32,
    #[bits(135, 2)]
    pub air_pressure_trend: u8,
    #[bits(137, 8, |v: u32| f64::from(v) / 10.0)]
    pub horz_visibility_nm: f64,
    #[bits(145, 12, |v: u32| f64::from(v) / 100.0 - 10.0)]
    pub water_level_m: f64,
    #[bits(157, 2)]
    pub water_level_trend: u8,
    #[bits(159, 8, |v: u32| f64::from(v) / 10.0)]
    pub surf_cur_speed_kts: f64,
    #[bits(167, 9)]
    pub surf_cur_dir: u16,
    #[bits(176, 8, |v: u32| f64::from(v) / 10.0)]
    pub cur_speed_2_kts: f64,
    #[bits(184, 9)]
    pub cur_dir_2: u16,
    #[bits(193, 5)]
    pub cur_depth_2_m: u8,
    #[bits(198, 8, |v: u32| f64::from(v) / 10.0)]
    pub cur_speed_3_kts: f64,
    #[bits(206, 9)]
    pub cur_dir_3: u16,
    #[bits(215, 5)]
    pub cur_depth_3_m: u8,
    #[bits(220, 8, |v: u32| f64::from(v) / 10.0)]
    pub wave_height_m: f64,
    #[bits(228, 6)]
    pub wave_period_s: u8,
    #[bits(234, 9)]
    pub wave_dir: u16,
    #[bits(243, 8, |v: u32| f64::from(v) / 10.0)]
    pub swell_height_m: f64,
    #[bits(251, 6)]
    pub swell_period_s: u8,
    #[bits(257, 9)]
    pub swell_dir: u16,
    #[bits(266, 4)]
    pub sea_state_beaufort: u8,
    #[bits(270, 10, |v: i32| f64::from(v) / 10.0)]
    pub water_temp_c: f64,
    #[bits(280, 3)]
    pub precip_type: u8,
    #[bits(283, 9, |v: u32| f64::from(v) / 10.0)]
    pub salinity_ppt: f64,
    #[bits(292, 2)]
    pub ice: u8,
}
