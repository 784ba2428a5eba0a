//! # Bill of Materials
//!
//! The screen mass as a tree of weighted sums. Leaves are parts whose mass
//! comes from a fitted formula or a catalog constant; every assembly is the
//! sum of `mass × multiplicity` over its terms, in the listed order.
//!
//! ```text
//! screen 00.00.00.00
//! ├── body 01.00.00.00
//! │   ├── frame 01.01.00.00 ── side plates, beams, hinges, shackles, fasteners
//! │   ├── tray 01.02.00.00
//! │   ├── insert grate 01.03.00.00 ── beams, bars × profile count, set screws
//! │   ├── table 01.04.00.00
//! │   └── skis, fasteners
//! ├── drive, shields, rakes × rake count, scraper, lid, wrench, stands,
//! │   chute, front covers × cover count, lids, stops, bar frame, sliders,
//! │   level probe, guides, bushings, nuts, chains
//! └── fasteners
//! ```
//!
//! Summation order is part of the contract: the same input always yields a
//! bit-identical total.

use serde::{Deserialize, Serialize};

use super::derivation::Derivation;
use super::screen::{CalcOptions, ScreenInput};
use crate::catalog::{self, Count};
use crate::equations::masses;
use crate::trace::TraceRecorder;
use crate::units::Kilograms;

/// Derived quantity a multiplicity is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountSource {
    ProfileCount,
    RakeCount,
    CoverCount,
}

/// How many times a component enters its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Multiplicity {
    /// Catalogued literal count
    Fixed { count: Count },
    /// Count taken from the derivation
    Derived { source: CountSource, count: Count },
}

impl Multiplicity {
    pub fn count(&self) -> Count {
        match self {
            Multiplicity::Fixed { count } | Multiplicity::Derived { count, .. } => *count,
        }
    }
}

/// A leaf of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub code: String,
    pub name: String,
    pub mass_kg: f64,
}

/// A part or a nested assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Component {
    Part(Part),
    Assembly(Assembly),
}

impl Component {
    pub fn code(&self) -> &str {
        match self {
            Component::Part(p) => &p.code,
            Component::Assembly(a) => &a.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Component::Part(p) => &p.name,
            Component::Assembly(a) => &a.name,
        }
    }

    pub fn mass_kg(&self) -> f64 {
        match self {
            Component::Part(p) => p.mass_kg,
            Component::Assembly(a) => a.mass_kg(),
        }
    }
}

/// One line of an assembly: a component and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassTerm {
    pub component: Component,
    pub multiplicity: Multiplicity,
}

impl MassTerm {
    /// Component mass times multiplicity
    pub fn weighted_mass_kg(&self) -> f64 {
        self.weighted_mass().0
    }

    fn weighted_mass(&self) -> Kilograms {
        Kilograms(self.component.mass_kg()) * self.multiplicity.count() as f64
    }
}

/// An assembly with its ordered list of terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub code: String,
    pub name: String,
    pub terms: Vec<MassTerm>,
}

impl Assembly {
    /// Weighted sum of the terms, accumulated in list order.
    pub fn mass_kg(&self) -> f64 {
        self.terms
            .iter()
            .fold(Kilograms(0.0), |acc, term| acc + term.weighted_mass())
            .0
    }

    /// Find a nested assembly by drawing code (depth-first).
    pub fn sub_assembly(&self, code: &str) -> Option<&Assembly> {
        self.terms.iter().find_map(|term| match &term.component {
            Component::Assembly(a) if a.code == code => Some(a),
            Component::Assembly(a) => a.sub_assembly(code),
            Component::Part(_) => None,
        })
    }

    /// Number of levels including this one and the leaves.
    pub fn depth(&self) -> usize {
        1 + self
            .terms
            .iter()
            .map(|term| match &term.component {
                Component::Assembly(a) => a.depth(),
                Component::Part(_) => 1,
            })
            .max()
            .unwrap_or(0)
    }
}

fn fixed(count: Count) -> Multiplicity {
    Multiplicity::Fixed { count }
}

/// Builds the tree in computation order, recording every mass as it is fixed.
struct BomBuilder<'t> {
    trace: &'t mut TraceRecorder,
}

impl BomBuilder<'_> {
    fn part(&mut self, code: &str, name: &str, mass_kg: f64, decimals: usize) -> Component {
        self.trace.mass(&format!("Mass of {} ({})", name, code), mass_kg, decimals);
        Component::Part(Part {
            code: code.to_string(),
            name: name.to_string(),
            mass_kg,
        })
    }

    fn assembly(&mut self, code: &str, name: &str, terms: Vec<MassTerm>) -> Assembly {
        let assembly = Assembly {
            code: code.to_string(),
            name: name.to_string(),
            terms,
        };
        self.trace.mass(&format!("Mass of {} ({})", name, code), assembly.mass_kg(), 1);
        assembly
    }
}

fn term(component: Component, multiplicity: Multiplicity) -> MassTerm {
    MassTerm {
        component,
        multiplicity,
    }
}

/// Build the bill of materials for a derived screen.
pub fn build(
    input: &ScreenInput,
    derivation: &Derivation,
    options: &CalcOptions,
    trace: &mut TraceRecorder,
) -> Assembly {
    let w = input.screen_width_code;
    let h = input.screen_height_code;
    let g = input.grate_height_code;
    let mut b = BomBuilder { trace };

    // Frame
    let frame_terms = vec![
        term(b.part("РКЭ-01.01.01.00", "left side plate", masses::left_side_plate(h), 1), fixed(1)),
        term(b.part("РКЭ-01.01.11.00", "right side plate", masses::right_side_plate(h), 1), fixed(1)),
        term(b.part("РКЭ-01.01.02.00", "cross beam", masses::cross_beam(w), 1), fixed(2)),
        term(b.part("РКЭ-01.01.03.00", "pivot axis beam", masses::pivot_beam(w), 1), fixed(1)),
        term(b.part("РКЭ-01.01.04.00", "top beam", masses::top_beam(w), 1), fixed(1)),
        term(b.part("РКЭ-01.01.05.00", "middle beam", masses::middle_beam(w), 1), fixed(1)),
        term(
            b.part("РКЭ-01.01.07.00", "hinge", masses::hinge(derivation.width_code_difference), 1),
            fixed(2),
        ),
        term(b.part("РКЭ-01.01.08.00", "spacer beam", masses::spacer_beam(w), 1), fixed(1)),
        term(
            b.part("РКЭ-01.01.09.00", "cover support beam", masses::cover_support_beam(w), 1),
            fixed(1),
        ),
        term(b.part("РКЭ-01.01.00.02", "split shackle", catalog::SPLIT_SHACKLE_KG, 1), fixed(2)),
        term(b.part("РКЭ-01.01.00.00", "frame fasteners", catalog::FRAME_FASTENERS_KG, 1), fixed(1)),
    ];
    let frame = b.assembly("РКЭ-01.01.00.00", "frame", frame_terms);

    let tray = b.part("РКЭ-01.02.00.00", "tray", masses::tray(w), 1);

    // Insert grate
    let grate_terms = vec![
        term(b.part("РКЭ-01.03.01.00", "insert grate beam", masses::grate_beam(w), 1), fixed(2)),
        term(
            b.part(
                "РКЭ-01.03.00.01",
                &format!("filter bar {}", input.filter_profile.token()),
                input.filter_profile.bar_mass_kg(g),
                1,
            ),
            Multiplicity::Derived {
                source: CountSource::ProfileCount,
                count: derivation.profile_count,
            },
        ),
        term(b.part("РКЭ-01.03.00.02", "set screw", catalog::SET_SCREW_KG, 1), fixed(4)),
    ];
    let grate = b.assembly("РКЭ-01.03.00.00", "insert grate", grate_terms);

    let table = b.part(
        "РКЭ-01.04.00.00",
        "table",
        masses::table(derivation.backwall_size_code, w),
        1,
    );
    let ski = b.part("РКЭ-01.00.00.01", "ski", catalog::SKI_KG, 1);
    let body_fasteners = b.part("РКЭ-01.00.00.00", "body fasteners", catalog::BODY_FASTENERS_KG, 1);

    let body = b.assembly(
        "РКЭ-01.00.00.00",
        "body",
        vec![
            term(Component::Assembly(frame), fixed(1)),
            term(tray, fixed(1)),
            term(Component::Assembly(grate), fixed(1)),
            term(table, fixed(1)),
            term(ski, fixed(2)),
            term(body_fasteners, fixed(1)),
        ],
    );

    // Screen
    let screen_terms = vec![
        term(Component::Assembly(body), fixed(1)),
        term(
            b.part("РКЭ-02.00.00.00", "drive unit", masses::drive_unit(w, options.heavy_drive), 1),
            fixed(1),
        ),
        term(
            b.part("РКЭ-03.00.00.00", "shield", masses::shield(derivation.width_code_difference, g), 1),
            fixed(2),
        ),
        term(
            b.part("РКЭ-04.00.00.00", "rake", masses::rake(w), 1),
            Multiplicity::Derived {
                source: CountSource::RakeCount,
                count: derivation.rake_count,
            },
        ),
        term(b.part("РКЭ-05.00.00.00", "scraper", masses::scraper(w), 1), fixed(1)),
        term(b.part("РКЭ-06.00.00.00", "top lid", masses::lid(w), 1), fixed(1)),
        term(b.part("РКЭ-07.00.00.00", "socket wrench", catalog::SOCKET_WRENCH_KG, 1), fixed(1)),
        term(
            b.part("РКЭ-08.00.00.00", "floor stand", masses::floor_stand(derivation.stand_size_code), 1),
            fixed(2),
        ),
        term(b.part("РКЭ-09.00.00.00", "discharge chute", masses::discharge_chute(w), 1), fixed(1)),
        term(
            b.part("РКЭ-10.00.00.00", "front cover", masses::front_cover(derivation.cover_size_code, w), 1),
            Multiplicity::Derived {
                source: CountSource::CoverCount,
                count: derivation.cover_count,
            },
        ),
        term(b.part("РКЭ-11.00.00.00", "side lid", catalog::SIDE_LID_KG, 1), fixed(2)),
        term(b.part("РКЭ-12.00.00.00", "scraper stop", catalog::SCRAPER_STOP_KG, 1), fixed(2)),
        term(b.part("РКЭ-13.00.00.00", "bar frame", masses::bar_frame(g, w), 1), fixed(1)),
        term(b.part("РКЭ-18.00.00.00", "slider", catalog::SLIDER_KG, 1), fixed(2)),
        term(b.part("РКЭ-19.00.00.00", "level probe", masses::level_probe(g), 1), fixed(1)),
        term(b.part("РКЭ-00.00.00.05", "drive guide", catalog::DRIVE_GUIDE_KG, 1), fixed(4)),
        term(b.part("РКЭ-00.00.00.09", "scraper bushing", catalog::SCRAPER_BUSHING_KG, 2), fixed(2)),
        term(b.part("РКЭ-00.00.00.13", "Tr20x4 lead nut", catalog::LEAD_NUT_KG, 1), fixed(2)),
        term(b.part("МС56-Р-100", "drive chain", masses::chain(derivation.chain_length_m), 1), fixed(2)),
        term(b.part("РКЭ-00.00.00.00", "screen fasteners", catalog::SCREEN_FASTENERS_KG, 1), fixed(1)),
    ];
    b.assembly("РКЭ-00.00.00.00", "screen", screen_terms)
}
