//! US regional messages (DAC 366 and 367, also received under DAC 316).

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use serde::Serialize;

use super::area::UsAreaNotice;
use crate::{BitReader, FromBits, FromFid, Position, RangeError};

/// Layouts registered under the US designated areas, selected by
/// functional ID.
#[derive(Debug, Clone, PartialEq, Serialize, FromFid)]
#[serde(tag = "description")]
pub enum Regional {
    #[fid(22)]
    #[serde(rename = "Area Notice (US)")]
    AreaNotice(UsAreaNotice),
    #[fid(33)]
    #[serde(rename = "Environmental Sensor Reports (US)")]
    Environmental(EnvironmentalReports),
}

/// Blocks shorter than this cannot hold a report and end the sequence.
const MIN_REPORT_BITS: usize = 27;

/// A sequence of sensor report blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalReports {
    pub reports: Vec<SensorReport>,
}

impl FromBits for EnvironmentalReports {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let mut reports = Vec::new();
        let mut offset = offset;

        while offset + MIN_REPORT_BITS <= bits.len_bits() {
            let report_type = bits.get_uint(offset, 4)? as u8;

            match ReportBody::decode(report_type, bits, offset)? {
                Some((body, width)) => {
                    reports.push(SensorReport::new(report_type, body));
                    offset += width;
                }
                None => {
                    let raw_remaining = hex::encode(&bits.data()[offset / 8..]);
                    reports.push(SensorReport::new(
                        report_type,
                        ReportBody::Unparsed { raw_remaining },
                    ));
                    break;
                }
            }
        }

        Ok(EnvironmentalReports { reports })
    }
}

/// One sensor report, tagged with its numeric and named type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReport {
    #[serde(rename = "type")]
    pub report_type: u8,
    pub type_name: String,
    #[serde(flatten)]
    pub body: ReportBody,
}

impl SensorReport {
    fn new(report_type: u8, body: ReportBody) -> Self {
        SensorReport {
            report_type,
            type_name: report_type_name(report_type),
            body,
        }
    }
}

/// Name a sensor report type, or `Unknown (N)` for unassigned types.
pub fn report_type_name(report_type: u8) -> String {
    let name = match report_type {
        0 => "Location",
        1 => "Wind",
        2 => "Water Level",
        3 => "Current 2D",
        4 => "Current 3D",
        5 => "Horizontal Current 2D",
        6 => "Horizontal Current 3D",
        7 => "Sea State",
        8 => "Salinity",
        9 => "Weather",
        10 => "Air Gap",
        11 => "Air Pressure",
        12 => "Ice",
        _ => return format!("Unknown ({report_type})"),
    };
    name.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportBody {
    Location(LocationReport),
    Wind(WindReport),
    WaterLevel(WaterLevelReport),
    Current2d(Current2dReport),
    Current3d(Current3dReport),
    SeaState(SeaStateReport),
    Salinity(SalinityReport),
    Weather(WeatherReport),
    AirGap(AirGapReport),
    AirPressure(AirPressureReport),
    /// A report of unknown type, or one cut short by the end of the
    /// payload. Holds the hex of every byte from the report onward.
    Unparsed { raw_remaining: String },
}

impl ReportBody {
    /// Decode the report of `report_type` at `offset`, returning it with
    /// its width in bits.
    ///
    /// Returns `None` if the type has no known layout, or if the block does
    /// not fit in the remaining payload.
    fn decode(
        report_type: u8,
        bits: &BitReader<'_>,
        offset: usize,
    ) -> Result<Option<(Self, usize)>, RangeError> {
        fn block<T: FromBits>(
            bits: &BitReader<'_>,
            offset: usize,
            wrap: fn(T) -> ReportBody,
        ) -> Result<Option<(ReportBody, usize)>, RangeError> {
            if offset + T::WIDTH > bits.len_bits() {
                return Ok(None);
            }
            Ok(Some((wrap(T::from_bits(bits, offset)?), T::WIDTH)))
        }

        match report_type {
            0 => block(bits, offset, ReportBody::Location),
            1 => block(bits, offset, ReportBody::Wind),
            2 => block(bits, offset, ReportBody::WaterLevel),
            3 => block(bits, offset, ReportBody::Current2d),
            4 => block(bits, offset, ReportBody::Current3d),
            7 => block(bits, offset, ReportBody::SeaState),
            8 => block(bits, offset, ReportBody::Salinity),
            9 => block(bits, offset, ReportBody::Weather),
            10 => block(bits, offset, ReportBody::AirGap),
            11 => block(bits, offset, ReportBody::AirPressure),
            _ => Ok(None),
        }
    }
}

/// Observation time and reporting site, shared by all reports but the
/// location report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromBits)]
#[bits(width = 23)]
pub struct SiteStamp {
    #[bits(0, 5)]
    pub day: u8,
    #[bits(5, 5)]
    pub hour: u8,
    #[bits(10, 6)]
    pub minute: u8,
    #[bits(16, 7)]
    pub site_id: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 88)]
pub struct LocationReport {
    #[bits(4, 6)]
    pub version: u8,
    #[position(10, extended)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(65, 4)]
    pub precision: u8,
    #[bits(69, 12, |v: i32| f64::from(v) / 10.0)]
    pub altitude_m: f64,
    #[bits(81, 4)]
    pub owner: u8,
    #[bits(85, 3)]
    pub timeout: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 109)]
pub struct WindReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 7)]
    pub wind_speed_kts: u8,
    #[bits(34, 7)]
    pub wind_gust_kts: u8,
    #[bits(41, 9)]
    pub wind_dir: u16,
    #[bits(50, 9)]
    pub wind_gust_dir: u16,
    #[bits(59, 3)]
    pub sensor_type: u8,
    #[bits(62, 7)]
    pub forecast_wind_speed_kts: u8,
    #[bits(69, 7)]
    pub forecast_wind_gust_kts: u8,
    #[bits(76, 9)]
    pub forecast_wind_dir: u16,
    #[bits(85, 5)]
    pub forecast_day: u8,
    #[bits(90, 5)]
    pub forecast_hour: u8,
    #[bits(95, 6)]
    pub forecast_minute: u8,
    #[bits(101, 8)]
    pub duration_min: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 83)]
pub struct WaterLevelReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 3)]
    pub level_type: u8,
    #[bits(30, 16, |v: i32| f64::from(v) / 100.0)]
    pub level_m: f64,
    #[bits(46, 2)]
    pub trend: u8,
    #[bits(48, 5)]
    pub datum: u8,
    #[bits(53, 3)]
    pub sensor_type: u8,
    #[bits(56, 3)]
    pub forecast_type: u8,
    #[bits(59, 5)]
    pub forecast_day: u8,
    #[bits(64, 5)]
    pub forecast_hour: u8,
    #[bits(69, 6)]
    pub forecast_minute: u8,
    #[bits(75, 8)]
    pub duration_min: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 53)]
pub struct Current2dReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 8, |v: u32| f64::from(v) / 10.0)]
    pub cur_speed_kts: f64,
    #[bits(35, 9)]
    pub cur_dir: u16,
    #[bits(44, 9)]
    pub cur_depth_m: u16,
}

/// One depth layer of a three-dimensional current report.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 33)]
pub struct CurrentLayer {
    #[bits(0, 8, |v: u32| f64::from(v) / 10.0)]
    pub north_kts: f64,
    #[bits(8, 8, |v: u32| f64::from(v) / 10.0)]
    pub east_kts: f64,
    #[bits(16, 8, |v: u32| f64::from(v) / 10.0)]
    pub up_kts: f64,
    #[bits(24, 9)]
    pub depth_m: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 96)]
pub struct Current3dReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27)]
    pub layer_1: CurrentLayer,
    #[bits(60)]
    pub layer_2: CurrentLayer,
    #[bits(93, 3)]
    pub sensor_type: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 112)]
pub struct SeaStateReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 8, |v: u32| f64::from(v) / 10.0)]
    pub swell_height_m: f64,
    #[bits(35, 6)]
    pub swell_period_s: u8,
    #[bits(41, 9)]
    pub swell_dir: u16,
    #[bits(50, 4)]
    pub sea_state_beaufort: u8,
    #[bits(54, 3)]
    pub swell_sensor_type: u8,
    #[bits(57, 10, |v: i32| f64::from(v) / 10.0)]
    pub water_temp_c: f64,
    #[bits(67, 7, |v: u32| f64::from(v) / 10.0)]
    pub water_temp_depth_m: f64,
    #[bits(74, 3)]
    pub water_sensor_type: u8,
    #[bits(77, 8, |v: u32| f64::from(v) / 10.0)]
    pub wave_height_m: f64,
    #[bits(85, 6)]
    pub wave_period_s: u8,
    #[bits(91, 9)]
    pub wave_dir: u16,
    #[bits(100, 3)]
    pub wave_sensor_type: u8,
    #[bits(103, 9, |v: u32| f64::from(v) / 10.0)]
    pub salinity_ppt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 77)]
pub struct SalinityReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 10, |v: i32| f64::from(v) / 10.0)]
    pub water_temp_c: f64,
    #[bits(37, 10, |v: u32| f64::from(v) / 100.0)]
    pub conductivity: f64,
    #[bits(47, 16, |v: u32| f64::from(v) / 10.0)]
    pub pressure_dbar: f64,
    #[bits(63, 9, |v: u32| f64::from(v) / 10.0)]
    pub salinity_ppt: f64,
    #[bits(72, 2)]
    pub salinity_type: u8,
    #[bits(74, 3)]
    pub sensor_type: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 88)]
pub struct WeatherReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 11, |v: i32| f64::from(v) / 10.0)]
    pub air_temp_c: f64,
    #[bits(38, 3)]
    pub air_temp_sensor: u8,
    #[bits(41, 3)]
    pub precip_type: u8,
    #[bits(44, 8, |v: u32| f64::from(v) / 10.0)]
    pub visibility_nm: f64,
    #[bits(52, 10, |v: i32| f64::from(v) / 10.0)]
    pub dew_point_c: f64,
    #[bits(62, 3)]
    pub dew_sensor: u8,
    #[bits(65, 9, |v: u32| v + 800)]
    pub air_pressure_hpa: u32,
    #[bits(74, 2)]
    pub pressure_trend: u8,
    #[bits(76, 3)]
    pub pressure_sensor: u8,
    #[bits(79, 9, |v: u32| f64::from(v) / 10.0)]
    pub salinity_ppt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 84)]
pub struct AirGapReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 13, |v: u32| f64::from(v) / 10.0)]
    pub air_draught_m: f64,
    #[bits(40, 13, |v: u32| f64::from(v) / 10.0)]
    pub air_gap_m: f64,
    #[bits(53, 2)]
    pub air_gap_trend: u8,
    #[bits(55, 13, |v: u32| f64::from(v) / 10.0)]
    pub predicted_air_gap_m: f64,
    #[bits(68, 5)]
    pub forecast_day: u8,
    #[bits(73, 5)]
    pub forecast_hour: u8,
    #[bits(78, 6)]
    pub forecast_minute: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 74)]
pub struct AirPressureReport {
    #[bits(4)]
    #[serde(flatten)]
    pub stamp: SiteStamp,
    #[bits(27, 9, |v: u32| v + 800)]
    pub air_pressure_hpa: u32,
    #[bits(36, 2)]
    pub pressure_trend: u8,
    #[bits(38, 3)]
    pub sensor_type: u8,
    #[bits(41, 9, |v: u32| v + 800)]
    pub forecast_pressure: u32,
    #[bits(50, 5)]
    pub forecast_day: u8,
    #[bits(55, 5)]
    pub forecast_hour: u8,
    #[bits(60, 6)]
    pub forecast_minute: u8,
    #[bits(66, 8)]
    pub duration_min: u8,
}
