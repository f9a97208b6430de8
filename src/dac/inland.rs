//! European inland waterway messages (DAC 200).

use alloc::{
    format,
    string::{String, ToString},
};

use serde::Serialize;

use crate::{FromBits, FromFid, Position};

/// Layouts registered under DAC 200, selected by functional ID.
#[derive(Debug, Clone, PartialEq, Serialize, FromFid)]
#[serde(tag = "description")]
pub enum Inland {
    #[fid(10)]
    #[serde(rename = "Inland Ship Static and Voyage")]
    ShipStaticVoyage(InlandStaticVoyage),
    #[fid(21)]
    #[serde(rename = "ETA at Lock/Bridge/Terminal")]
    Eta(EstimatedArrival),
    #[fid(22)]
    #[serde(rename = "RTA at Lock/Bridge/Terminal")]
    Rta(RecommendedArrival),
    #[fid(23)]
    #[serde(rename = "EMMA Warning")]
    EmmaWarning(EmmaWarning),
    #[fid(24)]
    #[serde(rename = "Water Levels")]
    WaterLevel(WaterLevel),
    #[fid(40)]
    #[serde(rename = "Signal Status")]
    SignalStatus(SignalStatus),
    #[fid(55)]
    #[serde(rename = "Number of Persons on Board (Inland)")]
    PersonsOnBoard(InlandPersonsOnBoard),
}

/// Inland static and voyage data.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct InlandStaticVoyage {
    /// European Number of Identification.
    #[bits(0, 48)]
    pub eni: String,
    #[bits(48, 13, |v: u32| f64::from(v) / 10.0)]
    pub length_m: f64,
    #[bits(61, 10, |v: u32| f64::from(v) / 10.0)]
    pub beam_m: f64,
    #[bits(71, 14)]
    pub ship_type: u16,
    #[bits(71, 14, |v: u32| ship_type_text(v))]
    pub ship_type_text: String,
    /// Number of blue cones or lights.
    #[bits(85, 3)]
    pub hazard: u8,
    #[bits(88, 11)]
    pub draught_cm: u16,
    /// 0 not available, 1 unloaded, 2 loaded.
    #[bits(99, 2)]
    pub loaded: u8,
    #[bits(101, 1)]
    pub speed_quality: bool,
    #[bits(102, 1)]
    pub course_quality: bool,
    #[bits(103, 1)]
    pub heading_quality: bool,
}

/// The lock, bridge or terminal an arrival time refers to.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 150)]
pub struct ArrivalPoint {
    /// UN country code.
    #[bits(0, 12)]
    pub country: String,
    /// UN location code.
    #[bits(12, 18)]
    pub location: String,
    #[bits(30, 30)]
    pub section: String,
    #[bits(60, 30)]
    pub terminal: String,
    #[bits(90, 30)]
    pub fairway_section: String,
    #[bits(120, 30)]
    pub fairway_hectometre: String,
}

/// Estimated time of arrival, sent by a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct EstimatedArrival {
    #[bits(0)]
    #[serde(flatten)]
    pub point: ArrivalPoint,
    #[bits(150, 4)]
    pub eta_month: u8,
    #[bits(154, 5)]
    pub eta_day: u8,
    #[bits(159, 5)]
    pub eta_hour: u8,
    #[bits(164, 6)]
    pub eta_minute: u8,
    #[bits(170, 3)]
    pub convoy_count: u8,
    #[bits(173, 13, |v: u32| f64::from(v) / 10.0)]
    pub convoy_length_m: f64,
    #[bits(186, 10, |v: u32| f64::from(v) / 10.0)]
    pub convoy_beam_m: f64,
    #[bits(196, 11)]
    pub convoy_draught_cm: u16,
    /// 0 downstream, 1 upstream.
    #[bits(207, 1)]
    pub direction: u8,
}

/// Recommended time of arrival, sent by the infrastructure operator.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct RecommendedArrival {
    #[bits(0)]
    #[serde(flatten)]
    pub point: ArrivalPoint,
    #[bits(150, 4)]
    pub rta_month: u8,
    #[bits(154, 5)]
    pub rta_day: u8,
    #[bits(159, 5)]
    pub rta_hour: u8,
    #[bits(164, 6)]
    pub rta_minute: u8,
    /// 0 operational, 1 limited operation, 2 out of order.
    #[bits(170, 2)]
    pub rta_status: u8,
}

/// Weather warning for a fairway section.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct EmmaWarning {
    #[bits(0, 8, |v: u32| v + 2000)]
    pub start_year: u32,
    #[bits(8, 4)]
    pub start_month: u8,
    #[bits(12, 5)]
    pub start_day: u8,
    #[bits(17, 8, |v: u32| v + 2000)]
    pub end_year: u32,
    #[bits(25, 4)]
    pub end_month: u8,
    #[bits(29, 5)]
    pub end_day: u8,
    #[bits(34, 5)]
    pub start_hour: u8,
    #[bits(39, 6)]
    pub start_minute: u8,
    #[bits(45, 5)]
    pub end_hour: u8,
    #[bits(50, 6)]
    pub end_minute: u8,
    #[bits(56, 30)]
    pub fairway_section: String,
    #[bits(86, 10)]
    pub fairway_hectometre_from: u16,
    #[bits(96, 10)]
    pub fairway_hectometre_to: u16,
    #[bits(106, 3)]
    pub warning_type: u8,
    #[bits(109, 14)]
    pub warning_value: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct WaterLevel {
    #[bits(0, 12)]
    pub country: String,
    #[bits(12, 11)]
    pub gauge_id: u16,
    #[bits(23, 14)]
    pub level_cm: i16,
    #[bits(37, 5)]
    pub day: u8,
    #[bits(42, 5)]
    pub hour: u8,
    #[bits(47, 6)]
    pub minute: u8,
}

/// State of a lock or bridge signal.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct SignalStatus {
    #[position(0)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(49, 4)]
    pub form: u8,
    #[bits(53, 9)]
    pub orientation: u16,
    #[bits(62, 3)]
    pub direction: u8,
    #[bits(65, 30)]
    pub status: u32,
    /// The status split into its ten three-bit light states, first light
    /// first.
    #[bits(65, 30, |v: u32| signal_lights(v))]
    pub lights: [u8; 10],
}

fn signal_lights(status: u32) -> [u8; 10] {
    let mut lights = [0; 10];
    for (i, light) in lights.iter_mut().enumerate() {
        *light = ((status >> (27 - 3 * i)) & 0b111) as u8;
    }
    lights
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct InlandPersonsOnBoard {
    #[bits(0, 8)]
    pub crew: u8,
    #[bits(8, 13)]
    pub passengers: u16,
    #[bits(21, 8)]
    pub personnel: u8,
}

/// Describe an inland ship type code, or `Unknown (N)` for codes outside
/// the table.
pub fn ship_type_text(code: u32) -> String {
    match INLAND_SHIP_TYPES.binary_search_by_key(&code, |(c, _)| *c) {
        Ok(i) => INLAND_SHIP_TYPES[i].1.to_string(),
        Err(_) => format!("Unknown ({code})"),
    }
}

/// Inland ship types, sorted by code.
static INLAND_SHIP_TYPES: &[(u32, &str)] = &[
    (8000, "Vessel, type unknown"),
    (8010, "Motor freighter"),
    (8020, "Motor tanker"),
    (8021, "Motor tanker, liquid cargo, type N"),
    (8022, "Motor tanker, liquid cargo, type C"),
    (8023, "Motor tanker, dry cargo as if liquid"),
    (8030, "Container vessel"),
    (8040, "Gas tanker"),
    (8050, "Motor freighter, tug"),
    (8060, "Motor tanker, tug"),
    (8070, "Motor freighter with one or more ships alongside"),
    (8080, "Motor freighter with tanker"),
    (8090, "Motor freighter pushing one or more freighters"),
    (8100, "Motor freighter pushing at least one tank-Loss"),
    (8110, "Tug, freighter"),
    (8120, "Tug, tanker"),
    (8130, "Tug, freighter, coupled"),
    (8140, "Tug, freighter/tanker, coupled"),
    (8150, "Freightbarge"),
    (8160, "Tankbarge"),
    (8161, "Tankbarge, liquid cargo, type N"),
    (8162, "Tankbarge, liquid cargo, type C"),
    (8163, "Tankbarge, dry cargo as if liquid"),
    (8170, "Freightbarge with containers"),
    (8180, "Tankbarge, gas"),
    (8210, "Pushtow, one cargo barge"),
    (8220, "Pushtow, two cargo barges"),
    (8230, "Pushtow, three cargo barges"),
    (8240, "Pushtow, four cargo barges"),
    (8250, "Pushtow, five cargo barges"),
    (8260, "Pushtow, six cargo barges"),
    (8270, "Pushtow, seven cargo barges"),
    (8280, "Pushtow, eight cargo barges"),
    (8290, "Pushtow, nine or more cargo barges"),
    (8310, "Pushtow, one tank/gas barge"),
    (8320, "Pushtow, two barges at least one tanker or gas barge"),
    (8330, "Pushtow, three barges at least one tanker or gas barge"),
    (8340, "Pushtow, four barges at least one tanker or gas barge"),
    (8350, "Pushtow, five barges at least one tanker or gas barge"),
    (8360, "Pushtow, six barges at least one tanker or gas barge"),
    (8370, "Pushtow, seven barges at least one tanker or gas barge"),
    (8380, "Pushtow, eight barges at least one tanker or gas barge"),
    (8390, "Pushtow, nine or more barges at least one tanker or gas barge"),
    (8400, "Tug, single"),
    (8410, "Tug, one or more tows"),
    (8420, "Tug, assisting a vessel or convey"),
    (8430, "Pushboat, single"),
    (8440, "Passenger ship"),
    (8441, "Ferry"),
    (8442, "Red Cross ship"),
    (8443, "Cruise ship"),
    (8444, "Passenger ship without accommodation"),
    (8450, "Service vessel, police patrol"),
    (8460, "Service vessel"),
    (8470, "Object, towed, not otherwise specified"),
    (8480, "Fishing boat"),
    (8490, "Bunkership"),
    (8500, "Barge, tanker, chemical"),
    (8510, "Object, not otherwise specified"),
];
