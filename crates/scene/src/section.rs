use serde::Serialize;

/// The fixed set of résumé sections shown on the carousel.
///
/// Declaration order is carousel order: section `i` sits at angle `i/N · 2π`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Projects,
    Experience,
    Skills,
    Education,
    Contact,
}

/// Glyph family drawn on the face of a card.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Project,
    Experience,
    Skills,
    Education,
    Contact,
}

impl IconKind {
    pub fn glyph(self) -> &'static str {
        match self {
            IconKind::Project => "</>",
            IconKind::Experience => "\u{2605}",
            IconKind::Skills => "{ }",
            IconKind::Education => "\u{2261}",
            IconKind::Contact => "@",
        }
    }
}

/// Static display descriptor of a section card.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Card body color, `#rrggbb`.
    pub color: &'static str,
    /// Border / glow color, `#rrggbb`.
    pub glow_color: &'static str,
    pub icon: IconKind,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Education,
        SectionKind::Contact,
    ];

    pub fn count() -> usize {
        Self::ALL.len()
    }

    /// Carousel slot of this section.
    pub fn index(self) -> usize {
        match self {
            SectionKind::Projects => 0,
            SectionKind::Experience => 1,
            SectionKind::Skills => 2,
            SectionKind::Education => 3,
            SectionKind::Contact => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Case-insensitive lookup by id (`projects`) or title (`PROJECTS`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| {
            let s = kind.section();
            s.id.eq_ignore_ascii_case(name) || s.title.eq_ignore_ascii_case(name)
        })
    }

    pub fn section(self) -> Section {
        match self {
            SectionKind::Projects => Section {
                kind: self,
                id: "projects",
                title: "PROJECTS",
                description: "View my work",
                color: "#594d00",
                glow_color: "#ffd700",
                icon: IconKind::Project,
            },
            SectionKind::Experience => Section {
                kind: self,
                id: "experience",
                title: "EXPERIENCE",
                description: "My journey",
                color: "#2c3e50",
                glow_color: "#00ffff",
                icon: IconKind::Experience,
            },
            SectionKind::Skills => Section {
                kind: self,
                id: "skills",
                title: "SKILLS",
                description: "Technical Arsenal",
                color: "#1a4a1c",
                glow_color: "#00ff00",
                icon: IconKind::Skills,
            },
            SectionKind::Education => Section {
                kind: self,
                id: "education",
                title: "EDUCATION",
                description: "Academic Log",
                color: "#4a1a4a",
                glow_color: "#ff44ff",
                icon: IconKind::Education,
            },
            SectionKind::Contact => Section {
                kind: self,
                id: "contact",
                title: "CONTACT",
                description: "Get in touch",
                color: "#4a1a1c",
                glow_color: "#ff8c00",
                icon: IconKind::Contact,
            },
        }
    }
}

pub fn all_sections() -> Vec<Section> {
    SectionKind::ALL.into_iter().map(SectionKind::section).collect()
}

#[cfg(test)]
mod tests {
    use super::SectionKind;

    #[test]
    fn index_matches_declaration_order() {
        for (i, kind) in SectionKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(SectionKind::from_index(i), Some(kind));
        }
        assert_eq!(SectionKind::from_index(SectionKind::count()), None);
    }

    #[test]
    fn lookup_by_id_or_title() {
        assert_eq!(SectionKind::from_name("PROJECTS"), Some(SectionKind::Projects));
        assert_eq!(SectionKind::from_name(" skills "), Some(SectionKind::Skills));
        assert_eq!(SectionKind::from_name("Contact"), Some(SectionKind::Contact));
        assert_eq!(SectionKind::from_name("blog"), None);
    }

    #[test]
    fn titles_are_unique() {
        let mut titles: Vec<_> = SectionKind::ALL.iter().map(|k| k.section().title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), SectionKind::count());
    }
}
