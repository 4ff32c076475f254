// The four published test hierarchies
//
// Posada, D. & Crandall, K. A. (2001). Selecting the best-fit model of
// nucleotide substitution. Systematic Biology 50:580-601, figure 4.
//
// Each tree is transcribed node by node, reject branch first. Labels run
// A..X (no W) in that order, as in the published figure.

use super::tree::{leaf, test, DecisionTree};
use crate::lrt::TestKind;
use crate::models::SubstitutionModel::{
    F81G, F81I, F81IG, Gtr, GtrG, GtrI, GtrIG, Hky, HkyG, HkyI, HkyIG, Jc, JcG, JcI, JcIG, K80G,
    K80I, K80IG, Sym, SymG, SymI, SymIG, F81, K80,
};

const FREQ: TestKind = TestKind::EqualBaseFrequencies;
const TITV: TestKind = TestKind::TiEqualsTv;
const RATES: TestKind = TestKind::EqualTiAndEqualTvRates;
const GAMMA: TestKind = TestKind::EqualSiteRates;
const INVAR: TestKind = TestKind::NoInvariableSites;

/// hLRT1: base frequencies, Ti=Tv, rate classes, then +G and +I
#[rustfmt::skip]
pub fn hlrt1() -> DecisionTree {
    DecisionTree::new(test(
        "A", FREQ, Jc, F81,
        test(
            "B", TITV, F81, Hky,
            test(
                "C", RATES, Hky, Gtr,
                test(
                    "D", GAMMA, Gtr, GtrG,
                    test("E", INVAR, GtrG, GtrIG, leaf(GtrIG), leaf(GtrG)),
                    test("F", INVAR, Gtr, GtrI, leaf(GtrI), leaf(Gtr)),
                ),
                test(
                    "G", GAMMA, Hky, HkyG,
                    test("H", INVAR, HkyG, HkyIG, leaf(HkyIG), leaf(HkyG)),
                    test("I", INVAR, Hky, HkyI, leaf(HkyI), leaf(Hky)),
                ),
            ),
            test(
                "J", GAMMA, F81, F81G,
                test("K", INVAR, F81G, F81IG, leaf(F81IG), leaf(F81G)),
                test("L", INVAR, F81, F81I, leaf(F81I), leaf(F81)),
            ),
        ),
        test(
            "M", TITV, Jc, K80,
            test(
                "N", RATES, K80, Sym,
                test(
                    "O", GAMMA, Sym, SymG,
                    test("P", INVAR, SymG, SymIG, leaf(SymIG), leaf(SymG)),
                    test("Q", INVAR, Sym, SymI, leaf(SymI), leaf(Sym)),
                ),
                test(
                    "R", GAMMA, K80, K80G,
                    test("S", INVAR, K80G, K80IG, leaf(K80IG), leaf(K80G)),
                    test("T", INVAR, K80, K80I, leaf(K80I), leaf(K80)),
                ),
            ),
            test(
                "U", GAMMA, Jc, JcG,
                test("V", INVAR, JcG, JcIG, leaf(JcIG), leaf(JcG)),
                test("X", INVAR, Jc, JcI, leaf(JcI), leaf(Jc)),
            ),
        ),
    ))
}

/// hLRT2: top-down from GTR+I+G, base frequencies first
#[rustfmt::skip]
pub fn hlrt2() -> DecisionTree {
    DecisionTree::new(test(
        "A", FREQ, SymIG, GtrIG,
        test(
            "B", RATES, HkyIG, GtrIG,
            test(
                "C", GAMMA, GtrI, GtrIG,
                test("D", INVAR, GtrG, GtrIG, leaf(GtrIG), leaf(GtrG)),
                test("E", INVAR, Gtr, GtrI, leaf(GtrI), leaf(Gtr)),
            ),
            test(
                "F", TITV, F81IG, HkyIG,
                test(
                    "G", GAMMA, HkyI, HkyIG,
                    test("H", INVAR, HkyG, HkyIG, leaf(HkyIG), leaf(HkyG)),
                    test("I", INVAR, Hky, HkyI, leaf(HkyI), leaf(Hky)),
                ),
                test(
                    "J", GAMMA, F81I, F81IG,
                    test("K", INVAR, F81G, F81IG, leaf(F81IG), leaf(F81G)),
                    test("L", INVAR, F81, F81I, leaf(F81I), leaf(F81)),
                ),
            ),
        ),
        test(
            "M", RATES, K80IG, SymIG,
            test(
                "N", GAMMA, SymI, SymIG,
                test("O", INVAR, SymG, SymIG, leaf(SymIG), leaf(SymG)),
                test("P", INVAR, Sym, SymI, leaf(SymI), leaf(Sym)),
            ),
            test(
                "Q", TITV, JcIG, K80IG,
                test(
                    "R", GAMMA, K80I, K80IG,
                    test("S", INVAR, K80G, K80IG, leaf(K80IG), leaf(K80G)),
                    test("T", INVAR, K80, K80I, leaf(K80I), leaf(K80)),
                ),
                test(
                    "U", GAMMA, JcI, JcIG,
                    test("V", INVAR, JcG, JcIG, leaf(JcIG), leaf(JcG)),
                    test("X", INVAR, Jc, JcI, leaf(JcI), leaf(Jc)),
                ),
            ),
        ),
    ))
}

/// hLRT3: bottom-up from JC, rate heterogeneity first
///
/// Node L compares JC+G with F81+G under the invariable-sites test kind,
/// exactly as published; it therefore uses the mixed chi-square.
#[rustfmt::skip]
pub fn hlrt3() -> DecisionTree {
    DecisionTree::new(test(
        "A", GAMMA, Jc, JcG,
        test(
            "B", INVAR, JcG, JcIG,
            test(
                "C", TITV, JcIG, K80IG,
                test(
                    "D", RATES, K80IG, SymIG,
                    test("E", FREQ, SymIG, GtrIG, leaf(GtrIG), leaf(SymIG)),
                    test("F", FREQ, K80IG, HkyIG, leaf(HkyIG), leaf(K80IG)),
                ),
                test("G", FREQ, JcIG, F81IG, leaf(F81IG), leaf(JcIG)),
            ),
            test(
                "H", TITV, JcG, K80G,
                test(
                    "I", RATES, K80G, SymG,
                    test("J", FREQ, SymG, GtrG, leaf(GtrG), leaf(SymG)),
                    test("K", FREQ, K80G, HkyG, leaf(HkyG), leaf(K80G)),
                ),
                test("L", INVAR, JcG, F81G, leaf(F81G), leaf(JcG)),
            ),
        ),
        test(
            "M", INVAR, Jc, JcI,
            test(
                "N", TITV, JcI, K80I,
                test(
                    "O", RATES, K80I, SymI,
                    test("P", FREQ, SymI, GtrI, leaf(GtrI), leaf(SymI)),
                    test("Q", FREQ, K80I, HkyI, leaf(HkyI), leaf(K80I)),
                ),
                test("R", FREQ, JcI, F81I, leaf(F81I), leaf(JcI)),
            ),
            test(
                "S", TITV, Jc, K80,
                test(
                    "T", RATES, K80, Sym,
                    test("U", FREQ, Sym, Gtr, leaf(Gtr), leaf(Sym)),
                    test("V", FREQ, K80, Hky, leaf(Hky), leaf(K80)),
                ),
                test("X", FREQ, Jc, F81, leaf(F81), leaf(Jc)),
            ),
        ),
    ))
}

/// hLRT4: top-down from GTR+I+G, rate heterogeneity first
#[rustfmt::skip]
pub fn hlrt4() -> DecisionTree {
    DecisionTree::new(test(
        "A", GAMMA, GtrI, GtrIG,
        test(
            "B", INVAR, GtrG, GtrIG,
            test(
                "C", RATES, HkyIG, GtrIG,
                test("D", FREQ, SymIG, GtrIG, leaf(GtrIG), leaf(SymIG)),
                test(
                    "E", TITV, F81IG, HkyIG,
                    test("F", FREQ, K80IG, HkyIG, leaf(HkyIG), leaf(K80IG)),
                    test("G", FREQ, JcIG, F81IG, leaf(F81IG), leaf(JcIG)),
                ),
            ),
            test(
                "H", RATES, HkyG, GtrG,
                test("I", FREQ, SymG, GtrG, leaf(GtrG), leaf(SymG)),
                test(
                    "J", TITV, F81G, HkyG,
                    test("K", FREQ, K80G, HkyG, leaf(HkyG), leaf(K80G)),
                    test("L", FREQ, JcG, F81G, leaf(F81G), leaf(JcG)),
                ),
            ),
        ),
        test(
            "M", INVAR, Gtr, GtrI,
            test(
                "N", RATES, HkyI, GtrI,
                test("O", FREQ, SymI, GtrI, leaf(GtrI), leaf(SymI)),
                test(
                    "P", TITV, F81I, HkyI,
                    test("Q", FREQ, K80I, HkyI, leaf(HkyI), leaf(K80I)),
                    test("R", FREQ, JcI, F81I, leaf(F81I), leaf(JcI)),
                ),
            ),
            test(
                "S", RATES, Hky, Gtr,
                test("T", FREQ, Sym, Gtr, leaf(Gtr), leaf(Sym)),
                test(
                    "U", TITV, F81, Hky,
                    test("V", FREQ, K80, Hky, leaf(Hky), leaf(K80)),
                    test("X", FREQ, Jc, F81, leaf(F81), leaf(Jc)),
                ),
            ),
        ),
    ))
}
