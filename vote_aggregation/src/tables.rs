// Fixed lookup tables.

use crate::model::{Party, Winner};

/// Color used when no vote was reported.
pub const NO_WINNER_COLOR: &str = "#363636";

pub fn party_color(party: Party) -> &'static str {
    match party {
        Party::Psd => "#de1313",
        Party::Usr => "#01a0e4",
        Party::Pnl => "#e6c835",
        Party::Udmr => "#63ab26",
        Party::Alde => "#095685",
        Party::Pmp => "#e7981c",
        Party::Pru => "#ff00ff",
        Party::Altele => "#e1e1e1",
    }
}

pub fn winner_color_of(winner: Winner) -> &'static str {
    match winner {
        Winner::None => NO_WINNER_COLOR,
        Winner::Party(p) => party_color(p),
    }
}

/// County names (upper case, without diacritics) and their license-plate codes.
pub const COUNTIES: [(&str, &str); 42] = [
    ("MARAMURES", "MM"),
    ("SALAJ", "SJ"),
    ("SATU MARE", "SM"),
    ("ARGES", "AG"),
    ("CALARASI", "CL"),
    ("DAMBOVITA", "DB"),
    ("GIURGIU", "GR"),
    ("IALOMITA", "IL"),
    ("PRAHOVA", "PH"),
    ("TELEORMAN", "TR"),
    ("BRAILA", "BR"),
    ("BACAU", "BC"),
    ("CONSTANTA", "CT"),
    ("GALATI", "GL"),
    ("ILFOV", "IF"),
    ("ALBA", "AB"),
    ("BRASOV", "BV"),
    ("TULCEA", "TL"),
    ("VRANCEA", "VN"),
    ("DOLJ", "DJ"),
    ("GORJ", "GJ"),
    ("MEHEDINTI", "MH"),
    ("OLT", "OT"),
    ("VALCEA", "VL"),
    ("ARAD", "AR"),
    ("CARAS-SEVERIN", "CS"),
    ("HUNEDOARA", "HD"),
    ("TIMIS", "TM"),
    ("COVASNA", "CV"),
    ("HARGHITA", "HR"),
    ("MURES", "MS"),
    ("SIBIU", "SB"),
    ("BOTOSANI", "BT"),
    ("IASI", "IS"),
    ("NEAMT", "NT"),
    ("SUCEAVA", "SV"),
    ("BIHOR", "BH"),
    ("BUCURESTI", "B"),
    ("VASLUI", "VS"),
    ("BISTRITA-NASAUD", "BN"),
    ("CLUJ", "CJ"),
    ("BUZAU", "BZ"),
];

/// The code of a county, looked up without regard to case.
pub fn county_code(name: &str) -> Option<&'static str> {
    let upper = name.trim().to_uppercase();
    COUNTIES
        .iter()
        .find(|(county, _)| *county == upper)
        .map(|(_, code)| *code)
}
