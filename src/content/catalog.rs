//! Read-only site copy and palette consumed by the view layer.

use crate::{
    foundation::core::{Region, Rgba8},
    scroll::sections::SectionMarker,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ServiceItem {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub items: &'static [ServiceItem],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub external_link: &'static str,
    pub image_path: &'static str,
    pub tags: &'static [&'static str],
    pub featured: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Social {
    pub name: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SkillGroup {
    pub group: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

/// Named page section and its pointer color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SectionColor {
    pub id: &'static str,
    pub color: Rgba8,
}

pub const ACCENT: Rgba8 = Rgba8::rgb(0x00, 0xff, 0x88);
pub const ACCENT_BLUE: Rgba8 = Rgba8::rgb(0x00, 0xd4, 0xff);
pub const ACCENT_PURPLE: Rgba8 = Rgba8::rgb(0xb7, 0x7b, 0xff);

/// Sections in page order.
pub const SECTION_PALETTE: &[SectionColor] = &[
    SectionColor { id: "home", color: ACCENT },
    SectionColor { id: "services", color: ACCENT_BLUE },
    SectionColor { id: "about", color: ACCENT_PURPLE },
    SectionColor { id: "work", color: ACCENT },
    SectionColor { id: "contact", color: ACCENT_BLUE },
];

pub const OWNER_NAME: &str = "Anshu Raj";
pub const CONTACT_EMAIL: &str = "rajanshu2123@gmail.com";
pub const LOCATION: &str = "Bokaro Steel City, Jharkhand, India";
pub const PROFILE_IMAGE: &str = "/images/anshu-profile.jpg";
pub const HERO_MODEL: &str = "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/DamagedHelmet/glTF/DamagedHelmet.gltf";
pub const RESUME_PATH: &str = "/resume/anshu-raj-resume.pdf";

pub const SERVICES: &[Service] = &[
    Service {
        title: "Full-Stack Development",
        description: "From MongoDB schemas to React components, I architect complete digital ecosystems. MERN stack specialist building production-grade applications that scale from 0 to 10,000 users without breaking a sweat.",
        items: &[
            ServiceItem {
                title: "Real-Time Applications",
                description: "(Socket.io, WebSockets, Live Collaboration)",
            },
            ServiceItem {
                title: "Modern Frontend",
                description: "(React, Next.js, TypeScript, Server Components)",
            },
            ServiceItem {
                title: "Robust Backend",
                description: "(Node.js, Express, REST APIs, MongoDB)",
            },
        ],
    },
    Service {
        title: "Animation & 3D Experiences",
        description: "Bridging art and engineering. I craft motion-rich interfaces with GSAP, Three.js, and WebGL that transform static designs into memorable experiences, running at 60fps on mobile.",
        items: &[
            ServiceItem {
                title: "3D Web Graphics",
                description: "(Three.js, React Three Fiber, WebGL Shaders)",
            },
            ServiceItem {
                title: "Advanced Animations",
                description: "(GSAP, ScrollTrigger, Framer Motion)",
            },
            ServiceItem {
                title: "Interactive Experiences",
                description: "(Particle Systems, Procedural Generation, GPU Effects)",
            },
        ],
    },
    Service {
        title: "AI Integration & Innovation",
        description: "Merging cutting-edge AI with practical applications. Google Gemini integration, smart rate limiting, and production-grade reliability in AI-powered tools that users actually want to use.",
        items: &[
            ServiceItem {
                title: "AI-Powered Features",
                description: "(Google Gemini API, Code Generation, Smart Assistance)",
            },
            ServiceItem {
                title: "Data Analytics",
                description: "(GenAI Analytics, Predictive Modeling, Risk Assessment)",
            },
            ServiceItem {
                title: "Intelligent Systems",
                description: "(Rate Limiting, Retry Logic, Error Handling)",
            },
        ],
    },
    Service {
        title: "Problem Solving at Scale",
        description: "500+ algorithmic problems solved. I optimize algorithms, refactor architectures, and solve complex system design challenges with elegant, maintainable solutions.",
        items: &[
            ServiceItem {
                title: "Data Structures",
                description: "(Arrays, Trees, Graphs, Dynamic Programming)",
            },
            ServiceItem {
                title: "System Design",
                description: "(Scalability, Performance, Architecture Patterns)",
            },
            ServiceItem {
                title: "Code Quality",
                description: "(Clean Code, Testing, Documentation, Best Practices)",
            },
        ],
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        name: "CodexSpace",
        description: "Real-time collaborative IDE powered by AI. Built for 50+ concurrent users with Google Gemini integration, WebContainer execution, and smart rate limiting.",
        external_link: "https://codex-space.vercel.app",
        image_path: "/assets/projects/codexspace.jpg",
        tags: &["React", "Socket.io", "Google Gemini AI", "WebContainer", "MongoDB"],
        featured: true,
    },
    Project {
        name: "GameBit Agency",
        description: "Cyberpunk portfolio with 3D helmet model, particle systems, and GPU-accelerated effects. Award-worthy animations with Locomotive Scroll.",
        external_link: "https://gamebit-agency.netlify.app",
        image_path: "/assets/projects/gamebit.jpg",
        tags: &["Three.js", "GSAP", "Locomotive Scroll", "WebGL"],
        featured: true,
    },
    Project {
        name: "Hyperspace Rush",
        description: "3D tunnel racing game with procedural track generation, difficulty progression, and 60fps mobile performance. Pure WebGL mastery.",
        external_link: "https://hyperspace-rush.netlify.app",
        image_path: "/assets/projects/hyperspace.jpg",
        tags: &["Three.js", "GSAP", "WebGL", "Vanilla JS"],
        featured: true,
    },
    Project {
        name: "SSS API Learning Hub",
        description: "Interactive API learning platform with 50+ topics, progressive quizzes, and 100+ viva questions. Engaging particle animations throughout.",
        external_link: "https://sss-api-hub.netlify.app",
        image_path: "/assets/projects/api-hub.jpg",
        tags: &["Vanilla JS", "REST APIs", "JSONPlaceholder", "Canvas API"],
        featured: false,
    },
];

pub const SOCIALS: &[Social] = &[
    Social {
        name: "GitHub",
        href: "https://github.com/anshu-c8NETed",
    },
    Social {
        name: "LinkedIn",
        href: "https://www.linkedin.com/in/anshu-raj-tech",
    },
    Social {
        name: "LeetCode",
        href: "https://leetcode.com/u/anshxu",
    },
];

pub const SKILLS: &[SkillGroup] = &[
    SkillGroup {
        group: "languages",
        skills: &["C++", "JavaScript", "TypeScript", "Python"],
    },
    SkillGroup {
        group: "frontend",
        skills: &[
            "React",
            "Next.js",
            "HTML5",
            "CSS3",
            "Tailwind",
            "GSAP",
            "Three.js",
            "Framer Motion",
        ],
    },
    SkillGroup {
        group: "backend",
        skills: &["Node.js", "Express.js", "Socket.io", "REST APIs"],
    },
    SkillGroup {
        group: "database",
        skills: &["MongoDB", "Git/GitHub"],
    },
    SkillGroup {
        group: "tools",
        skills: &["VSCode", "Cursor", "Figma", "Postman", "Render", "Netlify", "Vercel"],
    },
];

pub const ACHIEVEMENTS: &[&str] = &[
    "500+ Data Structures & Algorithms problems solved",
    "20+ production-ready projects deployed",
    "GenAI Powered Data Analytics - Tata iQ, Forage",
    "Front-End Software Engineering - Skyscanner, Forage",
    "Tech & Media Lead - PPGS, HIT",
];

pub const STATS: &[Stat] = &[
    Stat {
        number: "500+",
        label: "DSA Problems Solved",
    },
    Stat {
        number: "20+",
        label: "Production Projects",
    },
    Stat {
        number: "50+",
        label: "Concurrent Users Supported",
    },
    Stat {
        number: "60",
        label: "FPS Mobile Performance",
    },
];

/// Everything above as one serializable value.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Catalog {
    pub owner: &'static str,
    pub email: &'static str,
    pub location: &'static str,
    pub sections: &'static [SectionColor],
    pub services: &'static [Service],
    pub projects: &'static [Project],
    pub socials: &'static [Social],
    pub skills: &'static [SkillGroup],
    pub achievements: &'static [&'static str],
    pub stats: &'static [Stat],
}

pub const CATALOG: Catalog = Catalog {
    owner: OWNER_NAME,
    email: CONTACT_EMAIL,
    location: LOCATION,
    sections: SECTION_PALETTE,
    services: SERVICES,
    projects: PROJECTS,
    socials: SOCIALS,
    skills: SKILLS,
    achievements: ACHIEVEMENTS,
    stats: STATS,
};

pub fn section_color(id: &str) -> Option<Rgba8> {
    SECTION_PALETTE.iter().find(|s| s.id == id).map(|s| s.color)
}

pub fn featured_projects() -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(|p| p.featured)
}

/// Pair measured regions with their palette colors. Unknown ids are skipped.
pub fn section_markers<'a>(
    regions: impl IntoIterator<Item = (&'a str, Region)>,
) -> Vec<SectionMarker> {
    regions
        .into_iter()
        .filter_map(|(id, region)| {
            section_color(id).map(|color| SectionMarker {
                id: id.to_owned(),
                region,
                color,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/content/catalog.rs"]
mod tests;
