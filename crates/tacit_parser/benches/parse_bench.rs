use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tacit_parser::{parse, ParseOptions};

// A medium-size tacit source with every construct the grammar has
const TACIT_SOURCE: &str = r#"
# string helpers
S=/'|;
%{' *Z++' *(S*""sz+1-Z+=sz)+V};
PAD={X sz<W?(X+(W-X sz)*' ):X};
JOIN={A$B,C};
# arithmetic
N=1_000+2*3-4/5%6;
M=(N b& 255) b| (N b^ 15) b< 2 b> 1;
Q=N eq M | N nq M & N < M > 0;
# collections
ARR=[1;2;3;[4;5;[6;7]];{X*X}];
SUM=ARR.{A+B}@~+;
# strings
GREETING="Hello, $NAME$! You are $AGE+1$ next year.";
MSG="total: $SUM ! sz$ items $"nested $N$ string"$ done";
C='x;D='$;
# conditionals
R=N>10?"big":"small";
T=(N<0?_1:N>0?1:0) ab cd;
OPS=[~+;~-;~sz;~b&;~eq];
F={{{{X}}}};
G=F,ARR,OPS\N`M^Q$R
"#;

fn bench_parse_tacit(c: &mut Criterion) {
    let options = ParseOptions::default();
    c.bench_function("parse_tacit_medium", |b| {
        b.iter(|| {
            let output = parse(black_box(TACIT_SOURCE), &options).unwrap();
            black_box(output);
        });
    });
}

fn bench_tokenize_tacit(c: &mut Criterion) {
    c.bench_function("tokenize_tacit_medium", |b| {
        b.iter(|| {
            let scanned = tacit_scanner::tokenize(black_box(TACIT_SOURCE)).unwrap();
            black_box(scanned);
        });
    });
}

criterion_group!(benches, bench_parse_tacit, bench_tokenize_tacit);
criterion_main!(benches);
