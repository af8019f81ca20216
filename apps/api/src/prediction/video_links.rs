use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Used for unmapped roles and to pad short entries.
pub const PLACEHOLDER_LINKS: [&str; 2] = [
    "https://www.youtube.com/embed/dQw4w9WgXcQ",
    "https://www.youtube.com/embed/dQw4w9WgXcQ",
];

const STANDARD_LINKS: &[(&str, &[&str])] = &[
    (
        "Machine Learning Engineer",
        &[
            "https://www.youtube.com/embed/T4MLrtOKPjY?si=nRwq1K0rjBgXCNCt",
            "https://www.youtube.com/embed/AMxtGWcMYd4?si=5q-bC3zQkUdrntFA",
        ],
    ),
    (
        "Frontend Developer",
        &[
            "https://www.youtube.com/embed/DbRXv5TXMEE?si=gbZlWP4fyDgiBL_p",
            "https://www.youtube.com/embed/X8BYu3dMKf0?si=ySZgmkYU-M432BiW",
        ],
    ),
    (
        "Backend Developer",
        &[
            "https://www.youtube.com/embed/tsTXFiRT8b8?si=BoTO6xfjpxbXTqxU",
            "https://www.youtube.com/embed/QUcC1RB8vy0?si=oFtwWQ-b_JgtwAIM",
        ],
    ),
    (
        "Full Stack Developer",
        &[
            "https://www.youtube.com/embed/1IVopxj8q8U?si=EOt6KrXcsFHXtHaK",
            "https://www.youtube.com/embed/G0gKX4wmIGs?si=hg2O_5RHwE2dZWOQ",
        ],
    ),
    (
        "Data Analyst",
        &[
            "https://www.youtube.com/embed/o2mDheV9GFU?si=J-WUihm-mHmX90g_",
            "https://www.youtube.com/embed/dMn2QFTyXUQ?si=czy-sidD8n3UHbv0",
        ],
    ),
    (
        "AI Engineer",
        &[
            "https://www.youtube.com/embed/MhCHrvfAXlc?si=mmEXBIruylYlRCNI",
            "https://www.youtube.com/embed/efam9B6VKwo?si=kI_gCl45LDPcFO3a",
        ],
    ),
    (
        "Cybersecurity Specialist",
        &[
            "https://www.youtube.com/embed/ocDmB0muCC4?si=sjmcOELtI08MkC1e",
            "https://www.youtube.com/embed/eUiIGbDZFQc?si=zKSi0rSpLdZKWN9V",
        ],
    ),
    (
        "Mobile App Developer (Android)",
        &[
            "https://www.youtube.com/embed/KAh2TOrtTq4?si=_wvG3wBplCqrJkBR",
            "https://www.youtube.com/embed/AhUL5tHF3uc?si=2q4wmFRmATZsFEWY",
        ],
    ),
    (
        "Mobile App Developer (Flutter)",
        &[
            "https://www.youtube.com/embed/KdXp0gv601o?si=aqYmu8J3y1zvzNu2",
            "https://www.youtube.com/embed/oIzwUPr6Eow?si=fYECcmEk0bENRcMh",
        ],
    ),
    (
        "Python Developer",
        &[
            "https://www.youtube.com/embed/6R0TkF6Mgrk?si=2PhldJ2RYxirgRwt",
            "https://www.youtube.com/embed/05wsOB7mxmw?si=sTfjcLnJQ85uF9EA",
        ],
    ),
    (
        "Cloud Engineer",
        &[
            "https://www.youtube.com/embed/70oYrSnRgoI?si=FgozibvodHv1JXRr",
            "https://www.youtube.com/embed/NBFWgilq0EY?si=8uzCurhu57j-rJfz",
        ],
    ),
    (
        "Data Scientist",
        &[
            "https://www.youtube.com/embed/PFPt6PQNslE?si=xM9H1DkPGHW44MT2",
            "https://www.youtube.com/embed/NUpNoK_5NVs?si=EPsmkah0wgJEVZ8X",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "https://www.youtube.com/embed/P77GhVfvuKQ?si=T3f_Hg0zOBstpus2",
            "https://www.youtube.com/embed/lENeZmjD2zc?si=GWxN9KPRuswgQ4mC",
        ],
    ),
    (
        "UI/UX Designer",
        &[
            "https://www.youtube.com/embed/GvNPAglqPyY?si=dOiZuoCWQP87O7k7",
            "https://www.youtube.com/embed/FUJ5ZErpFSo?si=Z3OyUDWCDPeuiJuO",
        ],
    ),
    (
        "Big Data Engineer",
        &[
            "https://www.youtube.com/embed/Atc7Jt-OhXw?si=-J4YwBFX4K5rSj7a",
            "https://www.youtube.com/embed/rsOSrEbK7sU?si=lNxZOTDG-jcFZMha",
        ],
    ),
    (
        "iOS Developer",
        &[
            "https://www.youtube.com/embed/q9XJPz9dSh4?si=U40ZQhzzKIsWW4hC",
            "https://www.youtube.com/embed/CuB3dg8F3sY?si=3GQpyl8o0P5ZQQMN",
        ],
    ),
    (
        "Blockchain Developer",
        &[
            "https://www.youtube.com/embed/uULy2rc6YDc?si=H9UTjDlh_Gtn5b8G",
            "https://www.youtube.com/embed/8BpxqVGiuSk?si=DpyNQj04YPf4qv9E",
        ],
    ),
    (
        "Game Developer",
        &[
            "https://www.youtube.com/embed/GqKjSpd2zvY?si=UyCRFL9u92I2co66",
            "https://www.youtube.com/embed/qPxvmrtTQ_4?si=OEqZ1xth1RwX3g4Z",
        ],
    ),
    (
        "Data Engineer",
        &[
            "https://www.youtube.com/embed/f9KUFEeWMoc?si=sF5vcAx6npHOn2Zj",
            "https://www.youtube.com/embed/IGraly_Lvvg?si=A5NMoZNdLP_BKa3w",
        ],
    ),
    (
        "Product Manager",
        &[
            "https://www.youtube.com/embed/J8VBh3JhNDY?si=ZoBfNYqPN_SV4pkP",
            "https://www.youtube.com/embed/HNfVykENVrg?si=_DkEn2EJAmauq7SX",
        ],
    ),
];

static STANDARD_TABLE: Lazy<VideoLinkTable> =
    Lazy::new(|| VideoLinkTable::new(STANDARD_LINKS.iter().copied()));

/// Role → reference video lookup. Resolution always yields exactly two links.
#[derive(Debug, Clone, Default)]
pub struct VideoLinkTable {
    entries: HashMap<String, Vec<String>>,
}

impl VideoLinkTable {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(role, links)| {
                    (
                        role.to_string(),
                        links.iter().map(|l| l.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// The built-in table of known roles.
    pub fn standard() -> &'static VideoLinkTable {
        &STANDARD_TABLE
    }

    pub fn resolve(&self, role: &str) -> [String; 2] {
        let mut links = self
            .entries
            .get(role)
            .into_iter()
            .flatten()
            .take(2)
            .cloned()
            .chain(PLACEHOLDER_LINKS.iter().map(|l| l.to_string()));

        [
            links.next().unwrap_or_default(),
            links.next().unwrap_or_default(),
        ]
    }
}
