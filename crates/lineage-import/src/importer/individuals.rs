//! INDI and FAM records.

use lineage_core::{
  GraphSink,
  assertion::{EventRole, P2P},
  ids::PersonaId,
  model::Persona,
};
use lineage_gedcom::Record;

use super::{Importer, events::display_name, synthetic};
use crate::error::{Error, Result};

const FAMILY_EVENTS: &[&str] = &["MARR", "DIV", "CENS", "ENGA", "EVEN"];

const FAMILY_FIELDS: &[&str] = &[
  "CHIL", "HUSB", "WIFE", "CHAN", "MARR", "DIV", "CENS", "ENGA", "EVEN",
];

const PLACEHOLDER_NAME: &str = "@Unknown@";

impl<S: GraphSink> Importer<'_, S> {
  /// First pass over INDI: the main persona only, so that every individual
  /// can be referred to by the later passes.
  pub(super) fn create_bare_individual(&mut self, indi: &Record) -> Result<()> {
    let Some(xref) = indi.xref.as_deref() else {
      self.report(indi, "INDI without an identifier");
      return Ok(());
    };
    let name = indi.text("NAME").map(display_name).unwrap_or_default();
    let description = self.notes(indi);
    let last_change = self.last_change(indi);
    let id = self
      .sink
      .create_persona(Persona {
        name: name.clone(),
        description,
        last_change,
      })
      .map_err(Error::sink)?;
    self.personas.register(id, Some(xref), &name, last_change);
    Ok(())
  }

  /// Second pass over INDI: events, characteristics and relations.
  pub(super) fn import_individual(&mut self, indi: &Record) -> Result<()> {
    let Some(persona) = indi.xref.as_deref().and_then(|x| self.personas.main(x))
    else {
      return Ok(());
    };
    let principal = [(persona, EventRole::Principal)];

    for (tag, records) in indi.for_all_fields() {
      match tag {
        // Families are imported from their FAM record. CHAN and NOTE went
        // into the persona itself.
        "FAMC" | "FAMS" | "CHAN" | "NOTE" => {}

        "BIRT" => {
          let participants = self.birth_participants(indi, persona);
          for birth in records {
            self.create_event(&participants, "BIRT", birth, indi)?;
          }
        }

        // Cited without saying for what: keep the citation on a census.
        "SOUR" => {
          let census = synthetic(
            "CENS",
            records[0],
            "",
            records.iter().map(|&r| r.clone()).collect(),
          );
          self.create_event(&principal, "CENS", &census, indi)?;
        }

        "OBJE" => {
          let media = synthetic(
            "SOUR",
            records[0],
            "",
            std::iter::once(synthetic(
              "TITL",
              records[0],
              &format!("Media for {}", self.personas.name(persona)),
              Vec::new(),
            ))
            .chain(records.iter().map(|&r| r.clone()))
            .collect(),
          );
          let image = synthetic("_IMG", records[0], "", vec![media]);
          self.create_characteristic("_IMG", &image, persona, indi)?;
        }

        "ASSO" => {
          for asso in records {
            self.associate(persona, asso)?;
          }
        }

        _ if tag == "NAME" || self.types.part(tag).is_some() => {
          for record in records {
            self.create_characteristic(tag, record, persona, indi)?;
          }
        }

        _ if self.types.event(tag).is_some() => {
          for record in records {
            self.create_event(&principal, tag, record, indi)?;
          }
        }

        // Application extension. A plain value is a characteristic, a
        // structure is an event.
        _ if tag.starts_with('_') => {
          let as_event = records.iter().any(|r| r.has_children());
          for record in records {
            if as_event {
              self.create_event(&principal, tag, record, indi)?;
            } else {
              self.create_characteristic(tag, record, persona, indi)?;
            }
          }
        }

        _ => self.report(records[0], format!("Unhandled INDI.{tag}")),
      }
    }
    Ok(())
  }

  /// The individual and the spouses of every family it is a child of.
  fn birth_participants(
    &mut self,
    indi: &Record,
    persona: PersonaId,
  ) -> Vec<(PersonaId, EventRole)> {
    let mut participants = vec![(persona, EventRole::Principal)];
    for famc in indi.all("FAMC") {
      let Some(family) = self.resolve(famc, "family") else {
        continue;
      };
      for (tag, role) in [
        ("HUSB", EventRole::BirthFather),
        ("WIFE", EventRole::BirthMother),
      ] {
        if let Some(parent) = family.first(tag)
          && let Some(parent) = self.individual(parent)
        {
          participants.push((parent, role));
        }
      }
    }
    participants
  }

  /// An ASSO: a relation named by RELA with another individual.
  fn associate(&mut self, persona: PersonaId, asso: &Record) -> Result<()> {
    let Some(related) = self.individual(asso) else {
      return Ok(());
    };
    let mut relation = None;
    for (tag, records) in asso.for_all_fields() {
      match tag {
        "RELA" if !records[0].value.is_empty() => {
          relation =
            Some(self.types.p2p_or_create(&mut *self.sink, &records[0].value)?);
        }
        "SOUR" => {}
        _ => self.report(records[0], format!("Unhandled INDI.ASSO.{tag}")),
      }
    }
    let Some(p2p_type) = relation else {
      return Ok(());
    };
    let last_change = self.started;
    for cite in self.cite(Some(asso))? {
      let claim = self.claim(cite.source, String::new(), last_change);
      self.batch.p2p.push(P2P {
        claim,
        person1: persona,
        person2: related,
        p2p_type,
      });
    }
    Ok(())
  }

  /// Main persona of the individual `pointer` refers to.
  fn individual(&mut self, pointer: &Record) -> Option<PersonaId> {
    let Some(xref) = pointer.pointer() else {
      self.report(pointer, "Expected a pointer to an individual");
      return None;
    };
    let found = self.personas.main(xref);
    if found.is_none() {
      self.report(pointer, format!("Undefined individual {xref}"));
    }
    found
  }

  /// Persona standing for a spouse the family does not name.
  fn placeholder(&mut self, family: &Record) -> Result<PersonaId> {
    let last_change = self.last_change(family);
    let id = self
      .sink
      .create_persona(Persona {
        name: PLACEHOLDER_NAME.into(),
        description: String::new(),
        last_change,
      })
      .map_err(Error::sink)?;
    self.personas.register(id, None, PLACEHOLDER_NAME, last_change);
    Ok(id)
  }

  fn spouse(&mut self, family: &Record, tag: &str) -> Result<PersonaId> {
    match family.first(tag).and_then(|r| self.individual(r)) {
      Some(persona) => Ok(persona),
      None => self.placeholder(family),
    }
  }

  /// A FAM: its events with both spouses as principals, and a birth for
  /// each child whose birth is not imported yet.
  pub(super) fn import_family(&mut self, family: &Record) -> Result<()> {
    let husband = self.spouse(family, "HUSB")?;
    let wife = self.spouse(family, "WIFE")?;
    let spouses = [
      (husband, EventRole::Principal),
      (wife, EventRole::Principal),
    ];

    let mut found = 0;
    for &tag in FAMILY_EVENTS {
      for event in family.all(tag) {
        found += 1;
        self.create_event(&spouses, tag, event, family)?;
      }
    }
    // Without any event the couple would not be related at all.
    if found == 0 {
      let marriage = synthetic("MARR", family, "", Vec::new());
      self.create_event(&spouses, "MARR", &marriage, family)?;
    }

    for chil in family.all("CHIL") {
      let Some(child) = self.individual(chil) else {
        continue;
      };
      if self.births.contains_key(&child) {
        continue;
      }
      let participants = [
        (child, EventRole::Principal),
        (husband, EventRole::BirthFather),
        (wife, EventRole::BirthMother),
      ];
      self.create_event(&participants, "BIRT", chil, family)?;
    }

    self.check_fields(family, "FAM", FAMILY_FIELDS);
    Ok(())
  }
}
