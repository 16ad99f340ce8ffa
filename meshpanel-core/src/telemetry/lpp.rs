//! Cayenne Low Power Payload codec
//!
//! Each record is `[channel, type, data...]` with big-endian fixed-point
//! data. Only the types the sensors page knows how to show are supported.

use heapless::Vec;

/// Record buffer size
pub const LPP_CAPACITY: usize = 200;

const TYPE_TEMPERATURE: u8 = 103;
const TYPE_HUMIDITY: u8 = 104;
const TYPE_PRESSURE: u8 = 115;
const TYPE_VOLTAGE: u8 = 116;
const TYPE_CURRENT: u8 = 117;
const TYPE_ALTITUDE: u8 = 121;
const TYPE_POWER: u8 = 128;
const TYPE_GPS: u8 = 136;

/// Writer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LppError {
    /// Record does not fit the buffer
    BufferFull,
    /// Value outside the range the type can encode
    OutOfRange,
}

/// A decoded reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LppValue {
    /// Volts
    Voltage(f32),
    /// Amperes
    Current(f32),
    /// Degrees Celsius
    Temperature(f32),
    /// Percent relative humidity
    Humidity(f32),
    /// Hectopascal
    Pressure(f32),
    /// Metres
    Altitude(f32),
    /// Watts
    Power(f32),
    /// Degrees and metres
    Gps { lat: f32, lon: f32, alt: f32 },
}

impl LppValue {
    fn type_id(&self) -> u8 {
        match self {
            LppValue::Voltage(_) => TYPE_VOLTAGE,
            LppValue::Current(_) => TYPE_CURRENT,
            LppValue::Temperature(_) => TYPE_TEMPERATURE,
            LppValue::Humidity(_) => TYPE_HUMIDITY,
            LppValue::Pressure(_) => TYPE_PRESSURE,
            LppValue::Altitude(_) => TYPE_ALTITUDE,
            LppValue::Power(_) => TYPE_POWER,
            LppValue::Gps { .. } => TYPE_GPS,
        }
    }

    /// Short name used as the row label
    pub fn label(&self) -> &'static str {
        match self {
            LppValue::Voltage(_) => "voltage",
            LppValue::Current(_) => "current",
            LppValue::Temperature(_) => "temperature",
            LppValue::Humidity(_) => "humidity",
            LppValue::Pressure(_) => "pressure",
            LppValue::Altitude(_) => "altitude",
            LppValue::Power(_) => "power",
            LppValue::Gps { .. } => "gps",
        }
    }
}

/// One record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LppRecord {
    pub channel: u8,
    pub value: LppValue,
}

fn data_len(type_id: u8) -> Option<usize> {
    match type_id {
        TYPE_HUMIDITY => Some(1),
        TYPE_TEMPERATURE | TYPE_PRESSURE | TYPE_VOLTAGE | TYPE_CURRENT | TYPE_ALTITUDE
        | TYPE_POWER => Some(2),
        TYPE_GPS => Some(9),
        _ => None,
    }
}

fn scaled(value: f32, scale: f32, min: i32, max: i32) -> Result<i32, LppError> {
    let raw = value * scale;
    let raw = if raw < 0.0 { raw - 0.5 } else { raw + 0.5 } as i32;
    if raw < min || raw > max {
        return Err(LppError::OutOfRange);
    }
    Ok(raw)
}

/// Record sequence builder
#[derive(Debug, Clone, Default)]
pub struct LppWriter {
    buf: Vec<u8, LPP_CAPACITY>,
}

impl LppWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one reading
    pub fn add(&mut self, channel: u8, value: LppValue) -> Result<(), LppError> {
        let mut data = [0u8; 9];
        let len = match value {
            LppValue::Voltage(v) => put_u16(&mut data, scaled(v, 100.0, 0, 0xFFFF)?),
            LppValue::Current(v) => put_u16(&mut data, scaled(v, 1000.0, 0, 0xFFFF)?),
            LppValue::Temperature(v) => put_i16(&mut data, scaled(v, 10.0, -32768, 32767)?),
            LppValue::Humidity(v) => {
                data[0] = scaled(v, 2.0, 0, 0xFF)? as u8;
                1
            }
            LppValue::Pressure(v) => put_u16(&mut data, scaled(v, 10.0, 0, 0xFFFF)?),
            LppValue::Altitude(v) => put_i16(&mut data, scaled(v, 1.0, -32768, 32767)?),
            LppValue::Power(v) => put_u16(&mut data, scaled(v, 1.0, 0, 0xFFFF)?),
            LppValue::Gps { lat, lon, alt } => {
                const MAX24: i32 = 0x7F_FFFF;
                put_i24(&mut data[0..3], scaled(lat, 10_000.0, -MAX24, MAX24)?);
                put_i24(&mut data[3..6], scaled(lon, 10_000.0, -MAX24, MAX24)?);
                put_i24(&mut data[6..9], scaled(alt, 100.0, -MAX24, MAX24)?);
                9
            }
        };

        if self.buf.len() + 2 + len > LPP_CAPACITY {
            return Err(LppError::BufferFull);
        }
        // Capacity checked above
        let _ = self.buf.push(channel);
        let _ = self.buf.push(value.type_id());
        let _ = self.buf.extend_from_slice(&data[..len]);
        Ok(())
    }

    pub fn add_voltage(&mut self, channel: u8, volts: f32) -> Result<(), LppError> {
        self.add(channel, LppValue::Voltage(volts))
    }

    /// Reader over the records written so far
    pub fn reader(&self) -> LppReader<'_> {
        LppReader::new(&self.buf)
    }
}

fn put_u16(out: &mut [u8], raw: i32) -> usize {
    out[..2].copy_from_slice(&(raw as u16).to_be_bytes());
    2
}

fn put_i16(out: &mut [u8], raw: i32) -> usize {
    out[..2].copy_from_slice(&(raw as i16).to_be_bytes());
    2
}

fn put_i24(out: &mut [u8], raw: i32) {
    out.copy_from_slice(&raw.to_be_bytes()[1..]);
}

fn get_i24(data: &[u8]) -> i32 {
    // Sign-extend from bit 23
    let raw = i32::from_be_bytes([0, data[0], data[1], data[2]]);
    (raw << 8) >> 8
}

/// Sequential record reader
///
/// Stops at the end of the buffer, at a truncated record or at the first
/// type it does not know (its length cannot be skipped safely).
#[derive(Debug, Clone)]
pub struct LppReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LppReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Rewind to the first record
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    fn decode(type_id: u8, d: &[u8]) -> Option<LppValue> {
        let u16_at = |i: usize| u16::from_be_bytes([d[i], d[i + 1]]) as f32;
        let i16_at = |i: usize| i16::from_be_bytes([d[i], d[i + 1]]) as f32;
        let value = match type_id {
            TYPE_VOLTAGE => LppValue::Voltage(u16_at(0) / 100.0),
            TYPE_CURRENT => LppValue::Current(u16_at(0) / 1000.0),
            TYPE_TEMPERATURE => LppValue::Temperature(i16_at(0) / 10.0),
            TYPE_HUMIDITY => LppValue::Humidity(d[0] as f32 / 2.0),
            TYPE_PRESSURE => LppValue::Pressure(u16_at(0) / 10.0),
            TYPE_ALTITUDE => LppValue::Altitude(i16_at(0)),
            TYPE_POWER => LppValue::Power(u16_at(0)),
            TYPE_GPS => LppValue::Gps {
                lat: get_i24(&d[0..3]) as f32 / 10_000.0,
                lon: get_i24(&d[3..6]) as f32 / 10_000.0,
                alt: get_i24(&d[6..9]) as f32 / 100.0,
            },
            _ => return None,
        };
        Some(value)
    }
}

impl Iterator for LppReader<'_> {
    type Item = LppRecord;

    fn next(&mut self) -> Option<LppRecord> {
        let header = self.data.get(self.pos..self.pos + 2)?;
        let (channel, type_id) = (header[0], header[1]);
        let len = data_len(type_id)?;
        let start = self.pos + 2;
        let data = self.data.get(start..start + len)?;
        let value = Self::decode(type_id, data)?;
        self.pos = start + len;
        Some(LppRecord { channel, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_voltage_wire_format() {
        let mut w = LppWriter::new();
        w.add_voltage(1, 4.12).unwrap();
        assert_eq!(w.as_bytes(), &[1, 116, 0x01, 0x9C]);
    }

    #[test]
    fn test_mixed_records_read_back_in_order() {
        let mut w = LppWriter::new();
        w.add(1, LppValue::Voltage(3.91)).unwrap();
        w.add(2, LppValue::Temperature(-4.5)).unwrap();
        w.add(2, LppValue::Humidity(55.5)).unwrap();
        w.add(2, LppValue::Pressure(1013.2)).unwrap();

        let records: std::vec::Vec<LppRecord> = w.reader().collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].channel, 2);
        match records[1].value {
            LppValue::Temperature(t) => assert!(close(t, -4.5)),
            other => panic!("unexpected {:?}", other),
        }
        match records[3].value {
            LppValue::Pressure(p) => assert!(close(p, 1013.2)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_gps_negative_coordinates() {
        let mut w = LppWriter::new();
        w.add(
            3,
            LppValue::Gps {
                lat: -33.8688,
                lon: 151.2093,
                alt: -12.5,
            },
        )
        .unwrap();
        assert_eq!(w.len(), 11);

        let rec = w.reader().next().unwrap();
        let LppValue::Gps { lat, lon, alt } = rec.value else {
            panic!("not gps");
        };
        assert!(close(lat, -33.8688));
        assert!(close(lon, 151.2093));
        assert!(close(alt, -12.5));
    }

    #[test]
    fn test_unknown_type_stops_reader() {
        let data = [1, 116, 0x01, 0x9C, 5, 200, 0xAA, 1, 116, 0, 1];
        assert_eq!(LppReader::new(&data).count(), 1);
    }

    #[test]
    fn test_truncated_record_ignored() {
        let data = [1, 116, 0x01];
        assert_eq!(LppReader::new(&data).count(), 0);
    }

    #[test]
    fn test_buffer_full() {
        let mut w = LppWriter::new();
        // 4 bytes per voltage record
        for _ in 0..LPP_CAPACITY / 4 {
            w.add_voltage(1, 3.7).unwrap();
        }
        assert_eq!(w.add_voltage(1, 3.7), Err(LppError::BufferFull));
        assert_eq!(w.reader().count(), LPP_CAPACITY / 4);
    }

    #[test]
    fn test_out_of_range() {
        let mut w = LppWriter::new();
        assert_eq!(w.add_voltage(1, -1.0), Err(LppError::OutOfRange));
        assert_eq!(w.add(1, LppValue::Humidity(200.0)), Err(LppError::OutOfRange));
        assert!(w.is_empty());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut w = LppWriter::new();
        w.add_voltage(1, 3.3).unwrap();
        let mut r = w.reader();
        assert!(r.next().is_some());
        assert!(r.next().is_none());
        r.reset();
        assert!(r.next().is_some());
    }
}
