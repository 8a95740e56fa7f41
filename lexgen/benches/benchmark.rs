use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexgen::dfa::Dfa;
use lexgen::driver::compile;
use lexgen::nfa::Nfa;
use lexgen::parser;

const REGEXES: &[&str] = &["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"];

pub fn full_compile(c: &mut Criterion) {
    c.bench_function("compile (parse + nfa + dfa + minimize)", |b| {
        b.iter(|| compile(black_box(REGEXES)))
    });
}

pub fn parse_only(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            for regex in black_box(REGEXES) {
                parser::regex(regex).unwrap();
            }
        })
    });
}

pub fn nfa_to_dfa(c: &mut Criterion) {
    let asts: Vec<_> = REGEXES.iter().map(|r| parser::regex(r).unwrap()).collect();
    let nfa = Nfa::from_asts(&asts).unwrap();
    c.bench_function("subset construction", |b| {
        b.iter(|| Dfa::from_nfa(black_box(&nfa)))
    });
}

pub fn minimize(c: &mut Criterion) {
    let asts: Vec<_> = REGEXES.iter().map(|r| parser::regex(r).unwrap()).collect();
    let nfa = Nfa::from_asts(&asts).unwrap();
    let dfa = Dfa::from_nfa(&nfa).unwrap();
    c.bench_function("minimize", |b| {
        b.iter(|| {
            let mut dfa = dfa.clone();
            dfa.minimize();
            dfa
        })
    });
}

pub fn classify(c: &mut Criterion) {
    let mut dfa = compile(REGEXES).unwrap();
    dfa.minimize();
    c.bench_function("classify", |b| {
        b.iter(|| dfa.classify(black_box(b"bagabhghg")))
    });
}

criterion_group!(
    benches,
    full_compile,
    parse_only,
    nfa_to_dfa,
    minimize,
    classify
);
criterion_main!(benches);
