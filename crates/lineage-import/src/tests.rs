//! Whole-file import tests: GEDCOM text in, `MemoryGraph` out.

use chrono::{TimeZone, Utc};
use lineage_core::{
  MemoryGraph,
  assertion::EventRole,
  ids::{CharacteristicId, PersonaId, SourceId},
  model::SourceMedium,
};

use crate::{
  CollectingReporter, Error, ImportOptions, ImportSummary, import_str,
  persona::SAME_INDIVIDUAL_RATIONALE,
};

fn run_with(
  input: &str,
  options: &ImportOptions,
) -> (MemoryGraph, ImportSummary, CollectingReporter) {
  let mut reporter = CollectingReporter::new();
  let (graph, summary) =
    import_str(input, "family.ged", options, &mut reporter).unwrap();
  (graph, summary, reporter)
}

fn run(input: &str) -> (MemoryGraph, ImportSummary, CollectingReporter) {
  run_with(input, &ImportOptions::default())
}

fn source_titled(g: &MemoryGraph, title: &str) -> SourceId {
  let index = g
    .sources
    .iter()
    .position(|s| s.title == title)
    .unwrap_or_else(|| panic!("no source titled {title:?}"));
  SourceId(index as u32)
}

fn events_named(g: &MemoryGraph, name: &str) -> usize {
  g.events.iter().filter(|e| e.name == name).count()
}

/// `(gedcom tag, value)` of every part of a characteristic.
fn parts_of(g: &MemoryGraph, characteristic: CharacteristicId) -> Vec<(String, String)> {
  g.characteristic_parts
    .iter()
    .filter(|p| p.characteristic == characteristic)
    .map(|p| {
      let tag = g.characteristic_part_types[p.part_type.index()]
        .gedcom
        .clone()
        .unwrap_or_default();
      (tag, p.value.clone())
    })
    .collect()
}

fn characteristics_named(g: &MemoryGraph, name: &str) -> Vec<CharacteristicId> {
  g.characteristics
    .iter()
    .enumerate()
    .filter(|(_, c)| c.name == name)
    .map(|(i, _)| CharacteristicId(i as u32))
    .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
  items
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

const FAMILY: &str = "\
0 HEAD
1 SOUR test
1 DATE 1 JAN 2020
1 FILE family.ged
1 SUBM @U1@
0 @U1@ SUBM
1 NAME Jane Researcher
1 ADDR 1 Main St
2 CITY Springfield
0 @N1@ NOTE Loved gardening
0 @R1@ REPO
1 NAME City Archives
1 WWW https://archives.example
0 @S1@ SOUR
1 TITL Parish register
1 REPO @R1@
2 CALN 42
3 MEDI Book
0 @S2@ SOUR
1 TITL Census 1851
0 @I1@ INDI
1 NAME John /Smith/
1 SEX M
1 BIRT
2 DATE 12 JAN 1800
2 PLAC Paris
2 SOUR @S1@
3 PAGE 12
1 NOTE @N1@
1 FAMS @F1@
0 @I2@ INDI
1 NAME Mary /Jones/
1 BIRT
2 DATE abt 1805
2 PLAC Paris
2 SOUR @S1@
3 PAGE 12
0 @I3@ INDI
1 NAME Ann /Smith/
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
0 TRLR
";

// ─── Whole-file shape ────────────────────────────────────────────────────────

#[test]
fn family_file_imports_cleanly() {
  let (g, summary, reporter) = run(FAMILY);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  assert_eq!(summary.individuals, 3);
  assert_eq!(summary.families, 1);
  assert_eq!(summary.sources, 2);
  assert_eq!(summary.repositories, 1);
  assert_eq!(summary.surety, "normal");
  assert_eq!(summary.diagnostics, 0);

  assert_eq!(g.researchers[0].name, "Jane Researcher");
  assert_eq!(g.researchers[0].comment, "1 Main St\nSpringfield");
  assert_eq!(g.projects[0].name, "Gedcom import");
  assert_eq!(g.projects[0].description, "Import from family.ged");
  assert_eq!(g.projects[0].researcher_role, "Generated GEDCOM file");

  let john = g.personas_named("John Smith")[0];
  assert_eq!(g.persona(john).unwrap().description, "Loved gardening");
}

#[test]
fn file_source_stands_for_the_file() {
  let (g, summary, _) = run(FAMILY);
  let file = g.source(summary.file_source).unwrap();
  assert_eq!(file.title, "family.ged");
  assert_eq!(file.higher_source, None);
  assert_eq!(
    file.last_change,
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
  );
  let register = source_titled(&g, "Parish register");
  assert_eq!(g.source(register).unwrap().higher_source, Some(summary.file_source));
}

#[test]
fn uncited_facts_are_asserted_against_the_file() {
  let (g, summary, _) = run(FAMILY);
  let sex = characteristics_named(&g, "Sex")[0];
  let p2c: Vec<_> = g.p2c.iter().filter(|a| a.characteristic == sex).collect();
  assert_eq!(p2c.len(), 1);
  assert_eq!(p2c[0].claim.source, summary.file_source);
  assert_eq!(p2c[0].persona, g.personas_named("John Smith")[0]);
  assert_eq!(parts_of(&g, sex), pairs(&[("SEX", "M")]));
}

// ─── Families and births ─────────────────────────────────────────────────────

#[test]
fn family_without_events_gets_a_placeholder_marriage() {
  let (g, _, _) = run(FAMILY);
  let marriages = g.events_of_type("MARR");
  assert_eq!(marriages.len(), 1);
  let (id, event) = marriages[0];
  assert_eq!(event.name, "Marriage of John Smith and Mary Jones");

  let participants = g.participants(id);
  assert_eq!(participants.len(), 2);
  assert!(participants.iter().all(|a| a.role == EventRole::Principal));
}

#[test]
fn child_without_birth_is_linked_to_both_parents() {
  let (g, _, _) = run(FAMILY);
  let births = g.events_of_type("BIRT");
  assert_eq!(births.len(), 3);
  let (id, _) = births
    .iter()
    .find(|(_, e)| e.name == "Birth of Ann Smith")
    .copied()
    .unwrap();
  let mut roles: Vec<_> = g.participants(id).iter().map(|a| a.role).collect();
  roles.sort_by_key(|r| r.to_string());
  assert_eq!(roles, vec![
    EventRole::BirthFather,
    EventRole::BirthMother,
    EventRole::Principal
  ]);
}

const TWO_FAMILIES: &str = "\
0 HEAD
0 @I1@ INDI
1 NAME Paul /Roy/
0 @I2@ INDI
1 NAME Eve /Roy/
0 @I3@ INDI
1 NAME Leo /Roy/
1 BIRT
2 DATE 1830
1 FAMC @F1@
1 FAMC @F2@
0 @I4@ INDI
1 NAME Zoe /Roy/
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 CHIL @I4@
0 @F2@ FAM
1 HUSB @I1@
1 CHIL @I3@
1 CHIL @I4@
0 TRLR
";

#[test]
fn births_are_never_duplicated() {
  let (g, _, reporter) = run(TWO_FAMILIES);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  assert_eq!(events_named(&g, "Birth of Leo Roy"), 1);
  assert_eq!(events_named(&g, "Birth of Zoe Roy"), 1);
  assert_eq!(g.events_of_type("BIRT").len(), 2);
}

#[test]
fn birth_names_the_parents_of_every_family() {
  let (g, _, _) = run(TWO_FAMILIES);
  let (leo_birth, _) = g
    .events_of_type("BIRT")
    .into_iter()
    .find(|(_, e)| e.name == "Birth of Leo Roy")
    .unwrap();
  let paul = g.personas_named("Paul Roy")[0];
  let fathers: Vec<PersonaId> = g
    .participants(leo_birth)
    .iter()
    .filter(|a| a.role == EventRole::BirthFather)
    .map(|a| a.persona)
    .collect();
  assert_eq!(fathers, vec![paul, paul]);
}

#[test]
fn missing_spouse_becomes_a_placeholder() {
  let (g, _, _) = run(TWO_FAMILIES);
  assert_eq!(g.personas_named("@Unknown@").len(), 1);
  assert_eq!(g.events_of_type("MARR").len(), 2);
}

// ─── Sources ─────────────────────────────────────────────────────────────────

#[test]
fn identical_citations_share_one_nested_source() {
  let (g, _, _) = run(FAMILY);
  let register = source_titled(&g, "Parish register");
  let nested = g.nested_sources(register);
  assert_eq!(nested.len(), 1);
  let page = g.source(nested[0]).unwrap();
  assert_eq!(page.title, "Parish register PAGE=12");

  let pages: Vec<_> = g
    .citation_parts
    .iter()
    .filter(|p| p.source == nested[0])
    .collect();
  assert_eq!(pages.len(), 1);
  assert_eq!(pages[0].value, "12");
}

#[test]
fn a_source_cited_once_is_extended_in_place() {
  let input = "\
0 HEAD
0 @S1@ SOUR
1 TITL Will of Peter
0 @I1@ INDI
1 NAME Peter /Pan/
1 DEAT
2 SOUR @S1@
3 PAGE 3
3 NOTE Signed by two witnesses
0 TRLR
";
  let (g, _, _) = run(input);
  let will = source_titled(&g, "Will of Peter");
  assert!(g.nested_sources(will).is_empty());
  assert_eq!(g.source(will).unwrap().comments, "Signed by two witnesses");
  assert!(g.citation_parts.iter().any(|p| p.source == will && p.value == "3"));
}

#[test]
fn note_of_a_shared_source_without_details_is_reported() {
  let input = "\
0 HEAD
0 @S1@ SOUR
1 TITL Town records
0 @I1@ INDI
1 NAME Peter /Pan/
1 BIRT
2 SOUR @S1@
3 NOTE Faded ink
1 DEAT
2 SOUR @S1@
0 TRLR
";
  let (g, _, reporter) = run(input);
  let town = source_titled(&g, "Town records");
  assert!(g.nested_sources(town).is_empty());
  assert_eq!(g.source(town).unwrap().comments, "");

  let dropped = reporter
    .diagnostics
    .iter()
    .find(|d| d.message == "Dropped NOTE of a citation of @S1@ without details")
    .expect("dropped note is reported");
  assert_eq!(dropped.location.as_ref().unwrap().line, 7);
}

#[test]
fn inline_sources_carry_their_citation() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Rose /Hill/
1 BIRT
2 SOUR Family bible
3 PAGE 4
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  let bible = source_titled(&g, "Family bible");
  assert!(g.citation_parts.iter().any(|p| p.source == bible && p.value == "4"));
}

#[test]
fn source_held_by_a_repository() {
  let (g, _, _) = run(FAMILY);
  assert_eq!(g.repositories.len(), 1);
  assert_eq!(g.repositories[0].name, "City Archives");
  assert_eq!(g.repositories[0].info, "URL=https://archives.example");

  let link = &g.repository_sources[0];
  assert_eq!(link.source, source_titled(&g, "Parish register"));
  assert_eq!(link.repository.map(|r| r.index()), Some(0));
  assert_eq!(link.call_number.as_deref(), Some("42"));
  assert_eq!(link.medium, SourceMedium::Book);
}

#[test]
fn unknown_medium_is_reported() {
  let input = "\
0 HEAD
0 @R1@ REPO
1 NAME Library
0 @S1@ SOUR
1 TITL Ledger
1 REPO @R1@
2 CALN 7
3 MEDI Microfilm
2 CALN 8
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert_eq!(g.repository_sources[0].medium, SourceMedium::Unknown);
  assert_eq!(g.repository_sources[0].call_number.as_deref(), Some("7"));
  assert!(reporter.mentions("Unknown medium Microfilm"));
  assert!(reporter.mentions("A single CALN per REPO is supported"));
}

#[test]
fn every_extra_call_number_is_reported() {
  let input = "\
0 HEAD
0 @R1@ REPO
1 NAME Library
0 @S1@ SOUR
1 TITL Ledger
1 REPO @R1@
2 CALN 7
2 CALN 8
2 CALN 9
0 @S2@ SOUR
1 TITL Almanac
1 REPO @R1@
2 CALN 10
0 TRLR
";
  let (g, _, reporter) = run(input);
  let extra: Vec<usize> = reporter
    .diagnostics
    .iter()
    .filter(|d| d.message == "A single CALN per REPO is supported")
    .filter_map(|d| d.location.as_ref().map(|l| l.line))
    .collect();
  assert_eq!(extra, vec![8, 9]);

  let calls: Vec<_> = g
    .repository_sources
    .iter()
    .map(|l| (l.call_number.as_deref(), l.medium))
    .collect();
  assert_eq!(calls, vec![
    (Some("7"), SourceMedium::Unknown),
    (Some("10"), SourceMedium::Unknown),
  ]);
}

// ─── Personas per source ─────────────────────────────────────────────────────

const TWO_SOURCES: &str = "\
0 HEAD
0 @S1@ SOUR
1 TITL Book A
0 @S2@ SOUR
1 TITL Book B
0 @I1@ INDI
1 NAME Ann /Lee/
1 BIRT
2 SOUR @S1@
1 DEAT
2 SOUR @S2@
1 OCCU Baker
2 SOUR @S1@
0 TRLR
";

#[test]
fn each_source_gets_its_own_persona() {
  let (g, _, _) = run(TWO_SOURCES);
  let anns = g.personas_named("Ann Lee");
  assert_eq!(anns.len(), 3);

  let links = g.same_as_links();
  assert_eq!(links.len(), 2);
  assert!(links.iter().all(|l| l.person1 == anns[0]));
  assert!(
    links
      .iter()
      .all(|l| l.claim.rationale == SAME_INDIVIDUAL_RATIONALE)
  );

  // The occupation is cited from the same source as the birth.
  let (birth, _) = g.events_of_type("BIRT")[0];
  let occupation = characteristics_named(&g, "Occupation")[0];
  let born = g.participants(birth)[0].persona;
  let baker = g
    .p2c
    .iter()
    .find(|a| a.characteristic == occupation)
    .unwrap()
    .persona;
  assert_eq!(born, baker);
  assert_ne!(born, anns[0]);
}

#[test]
fn single_persona_mode_keeps_one_persona() {
  let options = ImportOptions {
    multiple_personas: false,
    ..ImportOptions::default()
  };
  let (g, _, _) = run_with(TWO_SOURCES, &options);
  assert_eq!(g.personas_named("Ann Lee").len(), 1);
  assert!(g.same_as_links().is_empty());
}

// ─── Individuals ─────────────────────────────────────────────────────────────

#[test]
fn names_split_into_parts() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME John Paul /Smith/ Jr
1 NAME Johnny /Smith/
2 GIVN Johnny
2 SURN Smith
2 NICK JJ
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  assert_eq!(g.personas[0].name, "John Paul Smith Jr");

  let names = characteristics_named(&g, "Name");
  assert_eq!(names.len(), 2);
  assert_eq!(
    parts_of(&g, names[0]),
    pairs(&[
      ("GIVN", "John"),
      ("_MIDL", "Paul"),
      ("SURN", "Smith"),
      ("NSFX", "Jr")
    ])
  );
  assert_eq!(
    parts_of(&g, names[1]),
    pairs(&[("GIVN", "Johnny"), ("SURN", "Smith"), ("NICK", "JJ")])
  );
}

#[test]
fn given_names_stay_whole_when_asked() {
  let options = ImportOptions {
    given_name_to_middle_name: false,
    ..ImportOptions::default()
  };
  let input = "0 HEAD\n0 @I1@ INDI\n1 NAME John Paul /Smith/\n0 TRLR\n";
  let (g, _, _) = run_with(input, &options);
  let name = characteristics_named(&g, "Name")[0];
  assert_eq!(
    parts_of(&g, name),
    pairs(&[("GIVN", "John Paul"), ("SURN", "Smith")])
  );
}

#[test]
fn typed_generic_events() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Max /Fox/
1 EVEN
2 TYPE Military
2 DATE 1916
1 EVEN
2 TYPE Baptism
0 TRLR
";
  let (g, _, _) = run(input);
  let military = g.events_of_type("_MIL");
  assert_eq!(military.len(), 1);
  assert_eq!(military[0].1.name, "Military service of Max Fox");
  assert_eq!(military[0].1.date.as_ref().and_then(|d| d.first().year()), Some(1916));
  assert_eq!(events_named(&g, "Baptism of Max Fox"), 1);
}

#[test]
fn extension_tags_grow_the_vocabularies() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Ida /Moss/
1 _DEG PhD
1 _ELEC
2 DATE 1920
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  let degree = characteristics_named(&g, "_deg")[0];
  assert_eq!(parts_of(&g, degree), pairs(&[("_DEG", "PhD")]));
  assert_eq!(g.events_of_type("_ELEC").len(), 1);
}

#[test]
fn associations_relate_personas() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Tom /Ash/
1 ASSO @I2@
2 RELA Godfather
1 ASSO @I9@
2 RELA Friend
0 @I2@ INDI
1 NAME Bob /Elm/
0 TRLR
";
  let (g, summary, reporter) = run(input);
  assert!(reporter.mentions("Undefined individual @I9@"));
  let godfather = g
    .p2p
    .iter()
    .find(|a| g.p2p_types[a.p2p_type.index()].name == "godfather")
    .unwrap();
  assert_eq!(godfather.person1, g.personas_named("Tom Ash")[0]);
  assert_eq!(godfather.person2, g.personas_named("Bob Elm")[0]);
  assert_eq!(godfather.claim.source, summary.file_source);
  assert!(!g.p2p_types.iter().any(|t| t.name == "Friend"));
}

#[test]
fn event_notes_explain_the_principal() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Lou /Bay/
1 DEAT
2 NOTE Drowned
1 CHAN
2 DATE 5 MAR 2001
3 TIME 10:00:00
0 TRLR
";
  let (g, _, _) = run(input);
  let (death, _) = g.events_of_type("DEAT")[0];
  let claim = &g.participants(death)[0].claim;
  assert_eq!(claim.rationale, "Drowned");
  assert_eq!(
    claim.last_change,
    Utc.with_ymd_and_hms(2001, 3, 5, 10, 0, 0).unwrap()
  );
  assert_eq!(g.personas[0].last_change, claim.last_change);
}

// ─── Places and media ────────────────────────────────────────────────────────

#[test]
fn repeated_places_are_created_once() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Guy /Lac/
1 BIRT
2 PLAC Paris
3 MAP
4 LATI N48.85
4 LONG E2.35
1 DEAT
2 PLAC Paris
3 MAP
4 LATI N48.85
4 LONG E2.35
1 BURI
2 PLAC Lyon
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  assert_eq!(g.places.len(), 2);
  assert_eq!(g.place_parts.len(), 1);
  assert_eq!(g.place_parts[0].value, "N48.85 E2.35");
  let births = g.events_of_type("BIRT");
  let deaths = g.events_of_type("DEAT");
  assert_eq!(births[0].1.place, deaths[0].1.place);
}

#[test]
fn address_without_place_becomes_a_place() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Sue /Oak/
1 RESI
2 ADDR 3 Elm Road
3 CITY Leeds
3 _GRID 123
3 WEIRD x
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert_eq!(g.places.len(), 1);
  assert_eq!(g.places[0].name, "3 Elm Road");
  let values: Vec<_> = g.place_parts.iter().map(|p| p.value.as_str()).collect();
  assert_eq!(values, vec!["Leeds", "123"]);
  assert!(reporter.mentions("Unknown place part WEIRD"));
}

#[test]
fn media_on_an_individual_become_an_image() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Kim /Ray/
1 OBJE
2 FILE portrait.jpg
2 FORM jpg
2 TITL Portrait
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.messages());
  assert_eq!(characteristics_named(&g, "Image").len(), 1);
  let media = source_titled(&g, "Media for Kim Ray");
  assert_eq!(g.representations.len(), 1);
  assert_eq!(g.representations[0].source, media);
  assert_eq!(g.representations[0].mime_type, "image/jpeg");
  assert_eq!(g.representations[0].comments, "Portrait");
}

#[test]
fn media_on_a_place_are_attached_once() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Ned /Ivy/
1 BIRT
2 PLAC Rome
2 OBJE
3 FILE rome.png
3 FORM png
3 TITL Rome
1 DEAT
2 PLAC Rome
2 OBJE
3 FILE rome.png
3 FORM png
3 TITL Rome
0 TRLR
";
  let (g, _, _) = run(input);
  let media = source_titled(&g, "Media for Rome");
  assert_eq!(g.source(media).unwrap().subject_place, g.events[0].place);
  assert_eq!(g.sources.iter().filter(|s| s.title == "Media for Rome").count(), 1);
  assert_eq!(g.representations.len(), 1);
}

#[test]
fn media_without_a_place_are_each_reported() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Ned /Ivy/
1 BIRT
2 DATE 1800
2 OBJE
3 FILE cradle.png
3 TITL Cradle
1 DEAT
2 DATE 1850
2 OBJE
3 FILE cradle.png
3 TITL Cradle
0 TRLR
";
  let (g, _, reporter) = run(input);
  let dropped: Vec<String> = reporter
    .diagnostics
    .iter()
    .filter(|d| d.message == "Unhandled OBJE without a place")
    .map(|d| d.location.as_ref().map(ToString::to_string).unwrap_or_default())
    .collect();
  assert_eq!(dropped, vec!["family.ged:6", "family.ged:11"]);
  assert!(g.representations.is_empty());
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

#[test]
fn unhandled_tags_are_reported_with_their_location() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Al /Bo/
1 WEIRD thing
1 BIRT
2 FOO bar
0 @X1@ ODDITY
0 TRLR
";
  let (g, summary, reporter) = run(input);
  let shown: Vec<String> =
    reporter.diagnostics.iter().map(|d| d.to_string()).collect();
  assert_eq!(shown, vec![
    "family.ged:4 Unhandled INDI.WEIRD",
    "family.ged:6 Unhandled EVENT.FOO",
    "family.ged:7 Unhandled FILE.ODDITY",
  ]);
  assert_eq!(summary.diagnostics, 3);
  // The rest of the individual still made it.
  assert_eq!(g.events_of_type("BIRT").len(), 1);
}

#[test]
fn dangling_references_are_reported() {
  let input = "\
0 HEAD
0 @I1@ INDI
1 NAME Cy /Dee/
1 NOTE @N9@
1 DEAT
2 SOUR @S9@
0 @F1@ FAM
1 HUSB @I7@
1 WIFE @I1@
0 TRLR
";
  let (g, _, reporter) = run(input);
  assert!(reporter.mentions("Undefined note @N9@"));
  assert!(reporter.mentions("Undefined source @S9@"));
  assert!(reporter.mentions("Undefined individual @I7@"));
  assert_eq!(g.personas_named("@Unknown@").len(), 1);
  assert_eq!(g.events_of_type("MARR").len(), 1);
}

#[test]
fn invalid_files_import_nothing() {
  let mut reporter = CollectingReporter::new();
  let err = import_str(
    "0 @I1@ INDI\n1 NAME X\n",
    "bad.ged",
    &ImportOptions::default(),
    &mut reporter,
  )
  .unwrap_err();
  assert!(matches!(
    err,
    Error::Gedcom(lineage_gedcom::Error::InvalidFormat { .. })
  ));
}

#[test]
fn empty_surety_scheme_is_rejected() {
  let options = ImportOptions {
    surety_scheme: Vec::new(),
    ..ImportOptions::default()
  };
  let mut reporter = CollectingReporter::new();
  let err = import_str("0 HEAD\n0 TRLR\n", "x.ged", &options, &mut reporter)
    .unwrap_err();
  assert!(matches!(err, Error::Model(lineage_core::Error::EmptySuretyScheme)));
}

#[test]
fn assertions_carry_the_middle_surety() {
  let options = ImportOptions {
    surety_scheme: vec!["doubtful".into(), "likely".into(), "sure".into()],
    ..ImportOptions::default()
  };
  let (g, summary, _) = run_with(FAMILY, &options);
  assert_eq!(summary.surety, "likely");
  let scheme = &g.projects[0].scheme;
  assert!(g.p2e.iter().all(|a| scheme.label(a.claim.surety) == Some("likely")));
}
