use crate::checksum::checksum;
use itertools::Itertools;

/// Column titles, single frequency 2E
pub const V2E_TITLES: &str = "SAT CL  MJD  STTIME TRKL ELV AZTH   REFSV      SRSV     REFSYS    SRSYS  DSG IOE MDTR SMDT MDIO SMDI FR HC FRC CK";

/// Column titles, dual frequency 2E
pub const V2E_DUAL_TITLES: &str = "SAT CL  MJD  STTIME TRKL ELV AZTH   REFSV      SRSV     REFSYS    SRSYS  DSG IOE MDTR SMDT MDIO SMDI MSIO SMSI ISG FR HC FRC CK";

pub const UNITS: &str = "             hhmmss  s  .1dg .1dg    .1ns     .1ps/s     .1ns    .1ps/s .1ns     .1ns.1ps/s.1ns.1ps/s";

/// 2E header lines, up to (excluding) CKSUM
pub const V2E_HEADER: [&str; 15] = [
    "CGGTTS     GENERIC DATA FORMAT VERSION = 2E",
    "REV DATE = 2023-06-27",
    "RCVR = GTR51 2204005 1.12.0",
    "CH = 20",
    "IMS = 99999",
    "LAB = ABC",
    "X = +4027881.79 m",
    "Y = +306998.67 m",
    "Z = +4919499.36 m",
    "FRAME = ITRF",
    "COMMENTS = NO COMMENTS",
    "INT DLY =   53.9 ns (GPS C1)     CAL_ID = 1nnn-yyyy",
    "CAB DLY =  237.0 ns",
    "REF DLY =  149.6 ns",
    "REF = UTC(ABC)",
];

/// Formats a track line from its (already padded) fields,
/// appends the line checksum.
pub fn track_line(fields: &[&str], tail: &[&str]) -> String {
    let mut line = fields.iter().chain(tail.iter()).join(" ");
    line.push(' ');
    let ck = checksum(&line);
    format!("{}{:02X}", line, ck)
}

/// Valid 2E single frequency track, starting `minutes` into the MJD.
pub fn gps_track(prn: u8, minutes: u32) -> String {
    let sat = format!("G{:02}", prn);
    let sttime = format!("{:02}{:02}00", minutes / 60, minutes % 60);
    track_line(
        &[
            sat.as_str(),
            "FF",
            "59568",
            sttime.as_str(),
            "0780",
            "215",
            "2863",
            "   +4286512",
            " -1512",
            "      +1203",
            "   -21",
            "  41",
            "087",
            " 165",
            " -87",
            "  98",
            " -17",
        ],
        &["00", "03", "L1C"],
    )
}

/// Valid 2E dual frequency track
pub fn galileo_dual_track(prn: u8) -> String {
    let sat = format!("E{:02}", prn);
    track_line(
        &[
            sat.as_str(),
            "FF",
            "60060",
            "000200",
            "0780",
            "254",
            "2466",
            "   -6093063",
            "  -150",
            "       -110",
            "   +13",
            "  19",
            "040",
            " 302",
            " -45",
            " 241",
            " -18",
            " 195",
            " -25",
            " 11",
        ],
        &["00", "00", "L3E"],
    )
}

/// Builds CGGTTS content: header lines, with a correct CKSUM,
/// column titles, units, then the body lines.
pub fn cggtts_content(header: &[&str], titles: &str, body: &[String]) -> String {
    let mut content = String::new();
    let mut crc = 0u8;

    for line in header {
        crc = crc.wrapping_add(checksum(line));
        content.push_str(line);
        content.push('\n');
    }

    crc = crc.wrapping_add(checksum("CKSUM = "));
    content.push_str(&format!("CKSUM = {:02X}\n\n", crc));

    content.push_str(titles);
    content.push('\n');
    content.push_str(UNITS);
    content.push('\n');

    for line in body {
        content.push_str(line);
        content.push('\n');
    }

    content
}
