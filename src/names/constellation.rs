//! The 88 IAU constellations.

/// A constellation's three-letter abbreviation, Latin name and genitive form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constellation {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub genitive: &'static str,
}

const fn c(abbreviation: &'static str, name: &'static str, genitive: &'static str) -> Constellation {
    Constellation {
        abbreviation,
        name,
        genitive,
    }
}

pub static CONSTELLATIONS: [Constellation; 88] = [
    c("And", "Andromeda", "Andromedae"),
    c("Ant", "Antlia", "Antliae"),
    c("Aps", "Apus", "Apodis"),
    c("Aqr", "Aquarius", "Aquarii"),
    c("Aql", "Aquila", "Aquilae"),
    c("Ara", "Ara", "Arae"),
    c("Ari", "Aries", "Arietis"),
    c("Aur", "Auriga", "Aurigae"),
    c("Boo", "Bootes", "Bootis"),
    c("Cae", "Caelum", "Caeli"),
    c("Cam", "Camelopardalis", "Camelopardalis"),
    c("Cnc", "Cancer", "Cancri"),
    c("CVn", "Canes Venatici", "Canum Venaticorum"),
    c("CMa", "Canis Major", "Canis Majoris"),
    c("CMi", "Canis Minor", "Canis Minoris"),
    c("Cap", "Capricornus", "Capricorni"),
    c("Car", "Carina", "Carinae"),
    c("Cas", "Cassiopeia", "Cassiopeiae"),
    c("Cen", "Centaurus", "Centauri"),
    c("Cep", "Cepheus", "Cephei"),
    c("Cet", "Cetus", "Ceti"),
    c("Cha", "Chamaeleon", "Chamaeleontis"),
    c("Cir", "Circinus", "Circini"),
    c("Col", "Columba", "Columbae"),
    c("Com", "Coma Berenices", "Comae Berenices"),
    c("CrA", "Corona Australis", "Coronae Australis"),
    c("CrB", "Corona Borealis", "Coronae Borealis"),
    c("Crv", "Corvus", "Corvi"),
    c("Crt", "Crater", "Crateris"),
    c("Cru", "Crux", "Crucis"),
    c("Cyg", "Cygnus", "Cygni"),
    c("Del", "Delphinus", "Delphini"),
    c("Dor", "Dorado", "Doradus"),
    c("Dra", "Draco", "Draconis"),
    c("Equ", "Equuleus", "Equulei"),
    c("Eri", "Eridanus", "Eridani"),
    c("For", "Fornax", "Fornacis"),
    c("Gem", "Gemini", "Geminorum"),
    c("Gru", "Grus", "Gruis"),
    c("Her", "Hercules", "Herculis"),
    c("Hor", "Horologium", "Horologii"),
    c("Hya", "Hydra", "Hydrae"),
    c("Hyi", "Hydrus", "Hydri"),
    c("Ind", "Indus", "Indi"),
    c("Lac", "Lacerta", "Lacertae"),
    c("Leo", "Leo", "Leonis"),
    c("LMi", "Leo Minor", "Leonis Minoris"),
    c("Lep", "Lepus", "Leporis"),
    c("Lib", "Libra", "Librae"),
    c("Lup", "Lupus", "Lupi"),
    c("Lyn", "Lynx", "Lyncis"),
    c("Lyr", "Lyra", "Lyrae"),
    c("Men", "Mensa", "Mensae"),
    c("Mic", "Microscopium", "Microscopii"),
    c("Mon", "Monoceros", "Monocerotis"),
    c("Mus", "Musca", "Muscae"),
    c("Nor", "Norma", "Normae"),
    c("Oct", "Octans", "Octantis"),
    c("Oph", "Ophiuchus", "Ophiuchi"),
    c("Ori", "Orion", "Orionis"),
    c("Pav", "Pavo", "Pavonis"),
    c("Peg", "Pegasus", "Pegasi"),
    c("Per", "Perseus", "Persei"),
    c("Phe", "Phoenix", "Phoenicis"),
    c("Pic", "Pictor", "Pictoris"),
    c("Psc", "Pisces", "Piscium"),
    c("PsA", "Piscis Austrinus", "Piscis Austrini"),
    c("Pup", "Puppis", "Puppis"),
    c("Pyx", "Pyxis", "Pyxidis"),
    c("Ret", "Reticulum", "Reticuli"),
    c("Sge", "Sagitta", "Sagittae"),
    c("Sgr", "Sagittarius", "Sagittarii"),
    c("Sco", "Scorpius", "Scorpii"),
    c("Scl", "Sculptor", "Sculptoris"),
    c("Sct", "Scutum", "Scuti"),
    c("Ser", "Serpens", "Serpentis"),
    c("Sex", "Sextans", "Sextantis"),
    c("Tau", "Taurus", "Tauri"),
    c("Tel", "Telescopium", "Telescopii"),
    c("Tri", "Triangulum", "Trianguli"),
    c("TrA", "Triangulum Australe", "Trianguli Australis"),
    c("Tuc", "Tucana", "Tucanae"),
    c("UMa", "Ursa Major", "Ursae Majoris"),
    c("UMi", "Ursa Minor", "Ursae Minoris"),
    c("Vel", "Vela", "Velorum"),
    c("Vir", "Virgo", "Virginis"),
    c("Vol", "Volans", "Volantis"),
    c("Vul", "Vulpecula", "Vulpeculae"),
];

/// Find a constellation by its three-letter abbreviation.
///
/// The first letter must be an exact upper-case match; the other two are compared
/// case-insensitively, so both `"CMa"` and `"CMA"` work but `"cma"` does not.
pub fn lookup(token: &str) -> Option<&'static Constellation> {
    let bytes = token.as_bytes();
    if bytes.len() != 3 || !bytes[0].is_ascii_uppercase() {
        return None;
    }
    CONSTELLATIONS.iter().find(|con| {
        let abb = con.abbreviation.as_bytes();
        abb[0] == bytes[0]
            && abb[1].eq_ignore_ascii_case(&bytes[1])
            && abb[2].eq_ignore_ascii_case(&bytes[2])
    })
}

/// Genitive form for an abbreviation, e.g. `"Cen"` → `"Centauri"`.
pub fn genitive(token: &str) -> Option<&'static str> {
    lookup(token).map(|con| con.genitive)
}
