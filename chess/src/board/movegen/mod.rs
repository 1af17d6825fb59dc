/******************************************\
|==========================================|
|         Module import and exports        |
|==========================================|
\******************************************/

pub mod r#gen;
pub mod lookup;
pub mod magic;

pub use lookup::{
    attacks, between_bb, bishop_attacks, king_attack, knight_attack, pawn_attack, queen_attacks,
    rook_attacks,
};
pub use magic::init_magic_tables;
pub use r#gen::{
    EVASION_RESERVE, FORCING_RESERVE, FULL_RESERVE, generate_evasions, generate_for_piece,
    generate_forcing, generate_legal,
};
