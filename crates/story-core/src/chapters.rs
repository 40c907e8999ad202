//! The authored story timeline.
//!
//! Seven chapters, defined once and never mutated. The ordered sequence is
//! the scroll timeline; the index into it is the only runtime selector.

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationTag {
    Dance,
    Meet,
    Scare,
    Love,
    Proposal,
    Party,
}

#[derive(Clone, Copy, Debug)]
pub struct Chapter {
    pub id: usize,
    pub title: &'static str,
    pub text: &'static str,
    pub camera_position: [f32; 3],
    /// Hex color driving the background and fog for this chapter.
    pub color_theme: &'static str,
    pub animation: AnimationTag,
}

impl Chapter {
    pub fn camera_vec3(&self) -> Vec3 {
        Vec3::from(self.camera_position)
    }
}

pub const STORY_CHAPTERS: [Chapter; 7] = [
    Chapter {
        id: 0,
        title: "Our Journey Begins",
        text: "Welcome to our story. Scroll down to relive the moments that brought us here.",
        camera_position: [0.0, 1.5, 8.0],
        color_theme: "#050505",
        animation: AnimationTag::Meet,
    },
    Chapter {
        id: 1,
        title: "The Dance",
        text: "It started at the college event. The music was loud, the lights were bright. \
               I was on stage, lost in the rhythm. Little did I know, you were watching from the crowd.",
        camera_position: [2.0, 1.8, 6.0],
        color_theme: "#240046",
        animation: AnimationTag::Dance,
    },
    Chapter {
        id: 2,
        title: "The Spark",
        text: "A month later, you told a friend I caught your eye. We were introduced. \
               Strangers became friends. We talked for hours under the campus trees. \
               Feelings grew like a gentle flower.",
        camera_position: [0.0, 1.3, 5.0],
        color_theme: "#1b4332",
        animation: AnimationTag::Meet,
    },
    Chapter {
        id: 3,
        title: "The Fear",
        text: "Then came the storm. Pneumonia took you to the hospital. Seeing you there... silence. \
               I was terrified of losing you. That's when I knew: It wasn't just friendship.",
        camera_position: [1.0, 1.5, 6.0],
        color_theme: "#001219",
        animation: AnimationTag::Scare,
    },
    Chapter {
        id: 4,
        title: "The Realization",
        text: "You recovered. The sun rose again. My heart was beating for one purpose. \
               I realized I couldn't wait any longer.",
        camera_position: [0.0, 1.5, 5.0],
        color_theme: "#780000",
        animation: AnimationTag::Love,
    },
    Chapter {
        id: 5,
        title: "The Proposal",
        text: "One week after your discharge. I gathered my courage. 'Will you be mine?' I asked. \
               You said yes.",
        camera_position: [1.0, 1.2, 5.0],
        color_theme: "#ffb703",
        animation: AnimationTag::Proposal,
    },
    Chapter {
        id: 6,
        title: "Happy Birthday!",
        text: "It's been a year of magic. Today, I celebrate you. The love of my life. \
               Happy Birthday, my dearest. Here's to forever.",
        camera_position: [0.0, 2.0, 7.0],
        color_theme: "#fb6f92",
        animation: AnimationTag::Party,
    },
];

pub const CHAPTER_COUNT: usize = STORY_CHAPTERS.len();
