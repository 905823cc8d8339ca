//! FB2 genre-code dictionary.
//!
//! Maps the schema's internal genre codes to display labels. Codes absent
//! from the table pass through verbatim.

/// The standard FB2.0 genre list.
const GENRES: &[(&str, &str)] = &[
    ("sf_history", "Alternative History"),
    ("sf_action", "Action Science Fiction"),
    ("sf_epic", "Epic Science Fiction"),
    ("sf_heroic", "Heroic Science Fiction"),
    ("sf_detective", "Detective Science Fiction"),
    ("sf_cyberpunk", "Cyberpunk"),
    ("sf_space", "Space Fiction"),
    ("sf_social", "Social Science Fiction"),
    ("sf_horror", "Horror & Mystic"),
    ("sf_humor", "Humorous Science Fiction"),
    ("sf_fantasy", "Fantasy"),
    ("sf", "Science Fiction"),
    ("det_classic", "Classical Detective"),
    ("det_police", "Police Stories"),
    ("det_action", "Action Detective"),
    ("det_irony", "Ironical Detective"),
    ("det_history", "Historical Detective"),
    ("det_espionage", "Espionage Detective"),
    ("det_crime", "Crime Detective"),
    ("det_political", "Political Detective"),
    ("det_maniac", "Maniac Detective"),
    ("det_hard", "Hard-boiled Detective"),
    ("thriller", "Thriller"),
    ("detective", "Detective"),
    ("prose_classic", "Classical Prose"),
    ("prose_history", "Historical Prose"),
    ("prose_contemporary", "Contemporary Prose"),
    ("prose_counter", "Counterculture"),
    ("prose_rus_classic", "Russian Classical Prose"),
    ("prose_su_classics", "Soviet Classical Prose"),
    ("love_contemporary", "Contemporary Romance"),
    ("love_history", "Historical Romance"),
    ("love_detective", "Detective Romance"),
    ("love_short", "Short Romance"),
    ("love_erotica", "Erotica"),
    ("adv_western", "Western"),
    ("adv_history", "Historical Adventures"),
    ("adv_indian", "Indians"),
    ("adv_maritime", "Maritime Fiction"),
    ("adv_geo", "Travel & Geography"),
    ("adv_animal", "Nature & Animals"),
    ("adventure", "Adventures"),
    ("child_tale", "Fairy Tales"),
    ("child_verse", "Verses for Children"),
    ("child_prose", "Prose for Children"),
    ("child_sf", "Science Fiction for Children"),
    ("child_det", "Detectives & Thrillers for Children"),
    ("child_adv", "Adventures for Children"),
    ("child_education", "Educational Literature"),
    ("children", "Children's Literature"),
    ("poetry", "Poetry"),
    ("dramaturgy", "Dramaturgy"),
    ("antique_ant", "Antique Literature"),
    ("antique_european", "European Classical Literature"),
    ("antique_russian", "Old Russian Literature"),
    ("antique_east", "Old East Literature"),
    ("antique_myths", "Myths, Legends & Epics"),
    ("antique", "Other Antique Literature"),
    ("sci_history", "History"),
    ("sci_psychology", "Psychology"),
    ("sci_culture", "Cultural Science"),
    ("sci_religion", "Religious Studies"),
    ("sci_philosophy", "Philosophy"),
    ("sci_politics", "Politics"),
    ("sci_business", "Business Literature"),
    ("sci_juris", "Jurisprudence"),
    ("sci_linguistic", "Linguistics"),
    ("sci_medicine", "Medicine"),
    ("sci_phys", "Physics"),
    ("sci_math", "Mathematics"),
    ("sci_chem", "Chemistry"),
    ("sci_biology", "Biology"),
    ("sci_tech", "Technical Science"),
    ("science", "Science"),
    ("comp_www", "Internet"),
    ("comp_programming", "Programming"),
    ("comp_hard", "Hardware"),
    ("comp_soft", "Software"),
    ("comp_db", "Databases"),
    ("comp_osnet", "OS & Networking"),
    ("computers", "Computers"),
    ("ref_encyc", "Encyclopedias"),
    ("ref_dict", "Dictionaries"),
    ("ref_ref", "Reference Books"),
    ("ref_guide", "Guidebooks"),
    ("reference", "Reference"),
    ("nonf_biography", "Biographies & Memoirs"),
    ("nonf_publicism", "Publicism"),
    ("nonf_criticism", "Criticism"),
    ("design", "Art & Design"),
    ("nonfiction", "Nonfiction"),
    ("religion_rel", "Religion"),
    ("religion_esoterics", "Esoterics"),
    ("religion_self", "Self-improvement"),
    ("religion", "Other Religious Literature"),
    ("humor_anecdote", "Anecdotes"),
    ("humor_prose", "Humorous Prose"),
    ("humor_verse", "Humorous Verses"),
    ("humor", "Humor"),
    ("home_cooking", "Cooking"),
    ("home_pets", "Pets"),
    ("home_crafts", "Hobbies & Crafts"),
    ("home_entertain", "Entertaining"),
    ("home_health", "Health"),
    ("home_garden", "Gardening"),
    ("home_diy", "Do-it-yourself"),
    ("home_sport", "Sports"),
    ("home_sex", "Erotica & Sex"),
    ("home", "Home & Family"),
];

/// Look up the display label for a genre code.
pub fn genre_label(code: &str) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}
