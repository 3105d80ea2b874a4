//! Built-in procedural track, used when no audio file is given.

/// Glicol composition: a filtered saw arpeggio in A minor
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 3.0 >> seq 57 _57 _~a 60 _ 64
~a: choose 57 60 64 69 0 0
~amp: ~gate >> envperc 0.002 0.18
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 4.0 >> mul 0.12
~mod: sin 0.15 >> mul 1600 >> add 1800
o: ~lead >> plate 0.15
"#;
