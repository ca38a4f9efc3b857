//! Magic-bitboard lookups for rook and bishop attacks.
//!
//! For each square, the blockers that matter (the relevant-occupancy mask) are
//! hashed by a multiply-and-shift with a per-square magic number into a dense
//! slice of precomputed attack sets. The magics below are verified
//! collision-free for the masks produced by `relevant_mask`.

use std::array::from_fn;

use once_cell::sync::Lazy;

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[rustfmt::skip]
const ROOK_MAGICS: [u64; 64] = [
    0x0080001024844000, 0x0940001008402004, 0x0100102000084102, 0x2200100804204200,
    0x8200100820020004, 0x0300080e01000400, 0x0400013000820408, 0x2080008000204100,
    0x0820800080400020, 0x1028400040201002, 0xd804801003200080, 0x0181000821001002,
    0x2040800400080080, 0x0006001008040200, 0x1005000401000200, 0x8042000444089211,
    0x0880004000200040, 0x0040010022428500, 0x0004820012002040, 0x080d010008201000,
    0x0820808008000400, 0x8602808004000200, 0x4042004040010080, 0x0d04420000408401,
    0x0520400080002082, 0x2040500440002000, 0x0810100080802000, 0x0000480280100080,
    0x8011080180140080, 0x0082000404001020, 0x01410104000810c2, 0x1900c05200012084,
    0x1000400090800020, 0x0040804000802000, 0x0020010021004015, 0x8300800800801000,
    0x40a0040801001101, 0x0702001806000c10, 0x0010800200800100, 0x0005008042000104,
    0x4100804000218000, 0x4402010040820021, 0x0000410020010010, 0x0201001006210008,
    0x0018000400808008, 0xa8cc001008020200, 0x0510020004010100, 0x4410204081020004,
    0x2214800840002080, 0x1020802008400480, 0x0068200080100080, 0x0000801000080080,
    0x2084020800048080, 0x020a000810040200, 0x1188480102100400, 0x2002041100a04200,
    0x0800182080010041, 0x0001008020104009, 0x008041004aa00013, 0x1080041000200901,
    0x2042000820101446, 0x0889000208040001, 0x8044208230210804, 0x0200040020804102,
];

#[rustfmt::skip]
const BISHOP_MAGICS: [u64; 64] = [
    0x0040011a02220020, 0x041010020141c020, 0x0010808091010110, 0x0009040900a44040,
    0x0025104010008100, 0x0800825041040882, 0x080a080904120000, 0x9000420084200200,
    0x4001980810008202, 0x021004504c004091, 0x01081000a2104400, 0x0004040400808900,
    0x8048120210803001, 0x5000050120120a00, 0x01004200902c3040, 0x0202248208120210,
    0x04c020920c580082, 0x182000020c040084, 0x0008009002801011, 0x0008221404001348,
    0x5804008e10220603, 0x0204082602010400, 0x0401820108011004, 0x000884050401010f,
    0x00202000080b4420, 0x0028040402100202, 0x0401100081004202, 0x0081180009004100,
    0x0448104008044000, 0x420800800a416002, 0x0400860021a23002, 0x0020a4a321040201,
    0x450918224188a000, 0x81a8080c00080988, 0x0007104810040800, 0x1801400a00022200,
    0x1080c40400804100, 0x0002014100020080, 0x0201880200a10116, 0x2408084140050103,
    0x0501100210002288, 0x4241844402022001, 0x009200202800d420, 0x811c110141040801,
    0x5000603600800410, 0x1020600042810441, 0x00181001020040c0, 0x0030020043190840,
    0x0045093002200094, 0x4222021084050425, 0x802002484c100100, 0x0000141020a80900,
    0x2010104002820410, 0x0404400801010185, 0x00c0500a04d10002, 0x0125280801082082,
    0x0005010450048400, 0x1110120082088202, 0x4212100544040400, 0x4007010011048800,
    0x0c20980014208210, 0x0002004902880200, 0x0004102001040092, 0x5620020200440988,
];

#[derive(Clone, Copy)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

pub(super) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    fn build(magics: &[u64; 64], directions: &[(isize, isize); 4]) -> Self {
        let mut offset = 0;
        let entries: [MagicEntry; 64] = from_fn(|square| {
            let mask = relevant_mask(square, directions);
            let entry = MagicEntry {
                mask,
                magic: magics[square],
                shift: 64 - mask.count_ones(),
                offset,
            };
            offset += 1usize << mask.count_ones();
            entry
        });

        let mut attacks = vec![0u64; offset];
        for (square, entry) in entries.iter().enumerate() {
            let mut subset = 0u64;
            // Carry-Rippler walk over every subset of the mask
            loop {
                let index = entry.offset + magic_index(entry, subset);
                attacks[index] = attacks_on_the_fly(square, subset, directions);
                subset = subset.wrapping_sub(entry.mask) & entry.mask;
                if subset == 0 {
                    break;
                }
            }
        }

        MagicTable { entries, attacks }
    }

    #[inline]
    pub(super) fn attacks(&self, square: usize, occupancy: u64) -> u64 {
        let entry = &self.entries[square];
        self.attacks[entry.offset + magic_index(entry, occupancy & entry.mask)]
    }
}

#[inline]
fn magic_index(entry: &MagicEntry, relevant: u64) -> usize {
    (relevant.wrapping_mul(entry.magic) >> entry.shift) as usize
}

fn on_board(rank: isize, file: isize) -> bool {
    (0..8).contains(&rank) && (0..8).contains(&file)
}

/// Squares whose occupancy can change the attack set: every ray square except
/// the last one before the board edge in that ray's direction.
fn relevant_mask(square: usize, directions: &[(isize, isize); 4]) -> u64 {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let mut mask = 0u64;
    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while on_board(r + dr, f + df) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

fn attacks_on_the_fly(
    square: usize,
    occupancy: u64,
    directions: &[(isize, isize); 4],
) -> u64 {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let mut attacks = 0u64;
    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while on_board(r, f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

pub(super) static ROOK_TABLE: Lazy<MagicTable> =
    Lazy::new(|| MagicTable::build(&ROOK_MAGICS, &ROOK_DIRECTIONS));
pub(super) static BISHOP_TABLE: Lazy<MagicTable> =
    Lazy::new(|| MagicTable::build(&BISHOP_MAGICS, &BISHOP_DIRECTIONS));

#[cfg(test)]
pub(super) fn slow_rook_attacks(square: usize, occupancy: u64) -> u64 {
    attacks_on_the_fly(square, occupancy, &ROOK_DIRECTIONS)
}

#[cfg(test)]
pub(super) fn slow_bishop_attacks(square: usize, occupancy: u64) -> u64 {
    attacks_on_the_fly(square, occupancy, &BISHOP_DIRECTIONS)
}
