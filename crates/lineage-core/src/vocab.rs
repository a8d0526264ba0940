//! Enumerated vocabularies every graph starts with.
//!
//! An import registers these first and grows them on demand when it meets
//! an application-specific `_XXX` tag.

/// `(name, gedcom tag)`.
pub const EVENT_TYPES: &[(&str, &str)] = &[
  ("Birth", "BIRT"),
  ("Death", "DEAT"),
  ("Marriage", "MARR"),
  ("Divorce", "DIV"),
  ("Divorce filed", "DIVF"),
  ("Annulment", "ANUL"),
  ("Engagement", "ENGA"),
  ("Marriage bann", "MARB"),
  ("Marriage contract", "MARC"),
  ("Marriage license", "MARL"),
  ("Marriage settlement", "MARS"),
  ("Census", "CENS"),
  ("Burial", "BURI"),
  ("Cremation", "CREM"),
  ("Christening", "CHR"),
  ("Adult christening", "CHRA"),
  ("Baptism", "BAPM"),
  ("Bar mitzvah", "BARM"),
  ("Bas mitzvah", "BASM"),
  ("Blessing", "BLES"),
  ("Confirmation", "CONF"),
  ("First communion", "FCOM"),
  ("Ordination", "ORDN"),
  ("Adoption", "ADOP"),
  ("Residence", "RESI"),
  ("Emigration", "EMIG"),
  ("Immigration", "IMMI"),
  ("Naturalization", "NATU"),
  ("Graduation", "GRAD"),
  ("Retirement", "RETI"),
  ("Probate", "PROB"),
  ("Will", "WILL"),
  ("Military service", "_MIL"),
  ("Event", "EVEN"),
];

/// `(name, gedcom tag, is a name part)`.
pub const CHARACTERISTIC_PART_TYPES: &[(&str, &str, bool)] = &[
  ("Given name", "GIVN", true),
  ("Surname", "SURN", true),
  ("Middle name", "_MIDL", true),
  ("Name prefix", "NPFX", true),
  ("Name suffix", "NSFX", true),
  ("Surname prefix", "SPFX", true),
  ("Nickname", "NICK", true),
  ("Sex", "SEX", false),
  ("Occupation", "OCCU", false),
  ("Title", "TITL", false),
  ("Religion", "RELI", false),
  ("Nationality", "NATI", false),
  ("Education", "EDUC", false),
  ("Caste", "CAST", false),
  ("Physical description", "DSCR", false),
  ("Identification number", "IDNO", false),
  ("Social security number", "SSN", false),
  ("Number of children", "NCHI", false),
  ("Number of marriages", "NMR", false),
  ("Property", "PROP", false),
  ("Fact", "FACT", false),
  ("Image", "_IMG", false),
  ("Note", "NOTE", false),
];

/// `(name, gedcom tag)`. `MAP` holds "latitude longitude".
pub const PLACE_PART_TYPES: &[(&str, &str)] = &[
  ("Address line 1", "ADR1"),
  ("Address line 2", "ADR2"),
  ("Address line 3", "ADR3"),
  ("City", "CITY"),
  ("State", "STAE"),
  ("Postal code", "POST"),
  ("Country", "CTRY"),
  ("Phone", "PHON"),
  ("Email", "EMAIL"),
  ("Fax", "FAX"),
  ("Website", "WWW"),
  ("Coordinates", "MAP"),
];

/// `(name, gedcom tag)`.
pub const CITATION_PART_TYPES: &[(&str, &str)] = &[
  ("Page", "PAGE"),
  ("Quality", "QUAY"),
  ("Date", "DATE"),
  ("Text", "TEXT"),
  ("Author", "AUTH"),
  ("Publisher", "PUBL"),
  ("Event", "EVEN"),
  ("Role", "ROLE"),
];

pub const SAME_AS: &str = "same as";

pub const P2P_TYPES: &[&str] = &[SAME_AS, "godfather", "godmother"];

pub const DEFAULT_SURETY_LEVELS: &[&str] =
  &["very low", "low", "normal", "high", "very high"];

/// Name given to a type created on demand from tag `tag`: `PAGE` -> "Page".
pub fn title_case(tag: &str) -> String {
  let mut chars = tag.chars();
  match chars.next() {
    Some(first) => {
      first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    }
    None => String::new(),
  }
}
